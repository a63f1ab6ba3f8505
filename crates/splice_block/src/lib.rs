// crates/splice_block/src/lib.rs

use source_document::{Block, Replacement, SourceDocument};

/// Produces a new document equal to
/// `lines[0..start] ++ replacement ++ lines[end..]`.
///
/// This is the sole mechanism for structural edits. It is a pure function:
/// the input document is never mutated, and every line outside
/// `[start, end)` appears in the output byte-identical and in its original
/// order. An empty replacement removes the block. The replacement's
/// internal correctness is the responsibility of whoever constructed it.
///
/// Out-of-range blocks are clamped to the document rather than panicking:
/// indices are capped at the line count, and an inverted range is treated
/// as an empty range at `start`.
pub fn splice_block(doc: &SourceDocument, block: Block, replacement: &Replacement) -> SourceDocument {
    let len = doc.len();
    let start = block.start.min(len);
    let end = block.end.clamp(start, len);

    let mut lines = Vec::with_capacity(len - (end - start) + replacement.len());
    lines.extend_from_slice(&doc.lines()[..start]);
    lines.extend_from_slice(replacement.lines());
    lines.extend_from_slice(&doc.lines()[end..]);
    SourceDocument::from_lines(lines)
}

/// Removes the block outright; shorthand for splicing an empty replacement.
pub fn remove_block(doc: &SourceDocument, block: Block) -> SourceDocument {
    splice_block(doc, block, &Replacement::empty())
}
