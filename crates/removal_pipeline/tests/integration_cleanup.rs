// crates/removal_pipeline/tests/integration_cleanup.rs

use removal_pipeline::{
    remove_call_line, remove_constructor_line, remove_documented_function, remove_require_line,
    RemovalPipeline,
};

/// A realistic cleanup: strip a documented helper, its imports, its
/// constructor, and its call sites out of a controller in one ordered
/// pass.
const CONTROLLER: &str = "\
const { vaultService } = require('../services/vaultService');
const VaultService = require('../services/vaultService');
const backupService = new VaultService();

/**
 * Helper function to determine which payout system a match uses.
 */
function getMatchSystem(match) {
  if (match.escrowAddress) {
    return 'escrow';
  }
  return null;
}

async function settle(matchId) {
  const updatedMatch = await load(matchId);
  const matchSystem = getMatchSystem(updatedMatch);
  await payout(updatedMatch);
}
";

fn full_pipeline() -> RemovalPipeline {
    let mut pipeline = RemovalPipeline::new();
    pipeline.push(remove_documented_function("getMatchSystem").unwrap());
    pipeline.push(remove_require_line("vaultService").unwrap());
    pipeline.push(remove_require_line("VaultService").unwrap());
    pipeline.push(remove_constructor_line("VaultService").unwrap());
    pipeline.push(remove_call_line("getMatchSystem").unwrap());
    pipeline
}

#[test]
fn test_cleanup_strips_every_target() {
    let cleaned = full_pipeline().apply(CONTROLLER);

    assert!(!cleaned.contains("require("));
    assert!(!cleaned.contains("new VaultService"));
    assert!(!cleaned.contains("function getMatchSystem"));
    assert!(!cleaned.contains("getMatchSystem(updatedMatch)"));

    // The surviving settle() body is intact.
    assert!(cleaned.contains("async function settle(matchId) {"));
    assert!(cleaned.contains("const updatedMatch = await load(matchId);"));
    assert!(cleaned.contains("await payout(updatedMatch);"));
}

#[test]
fn test_cleanup_is_idempotent() {
    let pipeline = full_pipeline();
    let once = pipeline.apply(CONTROLLER);
    let twice = pipeline.apply(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_cleanup_of_already_clean_document_is_identity() {
    let clean = "async function settle(matchId) {\n  await payout(matchId);\n}\n";
    assert_eq!(full_pipeline().apply(clean), clean);
}

#[test]
fn test_rule_order_is_deterministic() {
    // Two pipelines with the same rules in the same order agree exactly.
    let a = full_pipeline().apply(CONTROLLER);
    let b = full_pipeline().apply(CONTROLLER);
    assert_eq!(a, b);
}
