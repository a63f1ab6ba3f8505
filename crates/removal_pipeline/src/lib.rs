// crates/removal_pipeline/src/lib.rs

//! A fixed, ordered list of independent removal patterns, each applied to
//! the result of the previous one. Every pattern is optional: a document
//! that contains none of the targets passes through unchanged.
//!
//! Each removal is a `TransformRule` whose template is the empty string.
//! Pattern matching here is reserved for single-line or clearly-bounded
//! constructs; nested multi-line structures go through the balance scanner
//! instead.

use regex::escape;
use rewrite_rules::{apply_rules, TransformRule};

/// Ordered removal rules applied sequentially.
#[derive(Default)]
pub struct RemovalPipeline {
    rules: Vec<TransformRule>,
}

impl RemovalPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: TransformRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Applies every rule in order; each sees the previous rule's output.
    pub fn apply(&self, text: &str) -> String {
        log::debug!("applying {} removal rule(s)", self.rules.len());
        apply_rules(text, &self.rules)
    }
}

/// Removes a helper function introduced by a `/** ... */` doc comment and
/// closed by a `}` at column zero. The closing brace at column zero is what
/// keeps the pattern clearly bounded; helpers nested inside other blocks
/// are out of reach on purpose.
pub fn remove_documented_function(name: &str) -> Result<TransformRule, regex::Error> {
    let pattern = format!(
        r"(?s)/\*\*(?:[^*]|\*[^/])*\*/\s*\n(?:async\s+)?function\s+{}\s*\([^)]*\)[^{{]*\{{.*?\n\}}\n?",
        escape(name)
    );
    TransformRule::removal(&format!("remove function {name}"), &pattern)
}

/// Removes a one-line `require(...)` declaration for the given binding,
/// together with a `//` comment line directly above it, if any.
pub fn remove_require_line(binding: &str) -> Result<TransformRule, regex::Error> {
    let b = escape(binding);
    let pattern = format!(
        r"(?m)^(?:[ \t]*//[^\n]*\n)?[ \t]*(?:const|let|var)\s*(?:\{{\s*{b}\s*\}}|{b})\s*=\s*require\([^\n]*\)[^\n]*\n?"
    );
    TransformRule::removal(&format!("remove require {binding}"), &pattern)
}

/// Removes a one-line `const x = new Type(...);` instantiation.
pub fn remove_constructor_line(type_name: &str) -> Result<TransformRule, regex::Error> {
    let pattern = format!(
        r"(?m)^[ \t]*(?:const|let|var)\s+\w+\s*=\s*new\s+{}\s*\([^\n]*\)\s*;[^\n]*\n?",
        escape(type_name)
    );
    TransformRule::removal(&format!("remove constructor {type_name}"), &pattern)
}

/// Removes one-line statements invoking the given callee, covering both
/// bare calls and `const x = callee(...);` assignments. Dotted callees
/// (`service.method`) are matched literally.
pub fn remove_call_line(callee: &str) -> Result<TransformRule, regex::Error> {
    let pattern = format!(
        r"(?m)^[ \t]*(?:(?:const|let|var)\s+\w+\s*=\s*)?(?:await\s+)?{}\s*\([^\n]*\)\s*;[^\n]*\n?",
        escape(callee)
    );
    TransformRule::removal(&format!("remove calls to {callee}"), &pattern)
}
