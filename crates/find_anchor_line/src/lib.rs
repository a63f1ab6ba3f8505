// crates/find_anchor_line/src/lib.rs

use source_document::{RewriteError, SourceDocument};

/// Returns the index of the first line whose text contains the literal
/// `marker` substring.
///
/// The scan is in line order, so the result is always the earliest match.
/// Callers must locate the anchor before mutating the document; indices
/// are only meaningful against the document they were computed from.
///
/// # Errors
///
/// Returns `RewriteError::AnchorNotFound` if no line contains the marker.
pub fn find_anchor_line(doc: &SourceDocument, marker: &str) -> Result<usize, RewriteError> {
    doc.lines()
        .iter()
        .position(|line| line.contains(marker))
        .ok_or_else(|| RewriteError::AnchorNotFound {
            marker: marker.to_string(),
        })
}

/// Returns every line index containing `marker`, in order. An empty result
/// is not an error; callers that require an anchor use `find_anchor_line`.
pub fn find_all_anchor_lines(doc: &SourceDocument, marker: &str) -> Vec<usize> {
    let hits: Vec<usize> = doc
        .lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| line.contains(marker))
        .map(|(i, _)| i)
        .collect();
    if hits.len() > 1 {
        log::debug!(
            "marker '{}' occurs on {} lines: {:?}",
            marker,
            hits.len(),
            hits
        );
    }
    hits
}
