// crates/rewrite_block/src/lib.rs

//! Orchestrates one rewrite run: read the target in full, locate the
//! anchor, scan the block extent, splice the replacement, apply the
//! removal pipeline, and only then write the result back in one atomic
//! step. Any error aborts before the write, so the target file is left
//! byte-identical to its pre-run state.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use find_anchor_line::{find_all_anchor_lines, find_anchor_line};
use removal_pipeline::RemovalPipeline;
use scan_block_extent::{scan_block, DelimiterPair};
use source_document::{Block, Replacement, RewriteError, SourceDocument};
use splice_block::splice_block;

/// Everything one run needs, supplied by the caller; no ambient state.
pub struct RewriteConfig {
    /// File to rewrite.
    pub target: PathBuf,
    /// Literal text identifying the anchor line.
    pub marker: String,
    /// File whose lines replace the block; `None` removes the block.
    pub replacement: Option<PathBuf>,
    /// Maximum lines the balance scan may examine.
    pub window: usize,
    /// Removal patterns applied to the whole document after the block edit.
    pub removals: RemovalPipeline,
    /// Compute and report the edit without writing the file.
    pub dry_run: bool,
}

/// What a completed run did (or, for a dry run, would have done).
#[derive(Debug)]
pub struct RewriteOutcome {
    pub block: Block,
    pub lines_before: usize,
    pub lines_after: usize,
    pub applied: bool,
}

/// Executes the configured rewrite. All transformation happens on
/// in-memory values; the target is written once, at the end, via a
/// temp-file-then-rename so a failed run can never leave partial output.
pub fn run(config: &RewriteConfig) -> Result<RewriteOutcome> {
    let original = fs::read_to_string(&config.target)
        .with_context(|| format!("failed to read {}", config.target.display()))?;
    let doc = SourceDocument::parse(&original);

    let anchor = find_anchor_line(&doc, &config.marker)?;
    let occurrences = find_all_anchor_lines(&doc, &config.marker);
    if occurrences.len() > 1 {
        log::debug!(
            "marker occurs {} times; using the earliest at line {}",
            occurrences.len(),
            anchor + 1
        );
    }

    let block = scan_block(&doc, anchor, config.window, DelimiterPair::default())?;

    let replacement = match &config.replacement {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read replacement {}", path.display()))?;
            Replacement::from_text(&text)
        }
        None => Replacement::empty(),
    };

    let spliced = splice_block(&doc, block, &replacement);
    let rewritten = config.removals.apply(&spliced.render());
    let lines_after = SourceDocument::parse(&rewritten).len();

    let outcome = RewriteOutcome {
        block,
        lines_before: doc.len(),
        lines_after,
        applied: !config.dry_run,
    };

    if config.dry_run {
        return Ok(outcome);
    }
    write_atomic(&config.target, &rewritten)?;
    Ok(outcome)
}

/// Writes `contents` to a temp file in the target's directory, then
/// renames it over the target.
fn write_atomic(target: &Path, contents: &str) -> Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create a temp file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .context("failed to write rewritten content")?;
    tmp.persist(target)
        .with_context(|| format!("failed to replace {}", target.display()))?;
    Ok(())
}

/// Maps a run error to the process exit code. Usage errors exit with 2
/// (clap's convention) before a config ever reaches `run`.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RewriteError>() {
        Some(RewriteError::AnchorNotFound { .. }) => 3,
        Some(RewriteError::NoOpeningFound { .. }) => 4,
        Some(RewriteError::BoundsExceeded { .. }) => 5,
        Some(RewriteError::Io(_)) | None => 6,
    }
}
