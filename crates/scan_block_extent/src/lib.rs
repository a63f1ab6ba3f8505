// crates/scan_block_extent/src/lib.rs

//! Finds the end of a logical block by tracking the nesting depth of
//! paired delimiters across lines.
//!
//! The count is line-granular and blind to delimiters inside string or
//! comment literals. That is an accepted tradeoff of working without a
//! parser: the scan is only used on regions where the delimiters in the
//! text are structural.

use source_document::{Block, RewriteError, SourceDocument};

/// Default lookahead bound for a balanced scan.
pub const DEFAULT_SCAN_WINDOW: usize = 150;

/// A pair of nesting delimiters tracked by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterPair {
    pub open: char,
    pub close: char,
}

impl DelimiterPair {
    pub const BRACES: DelimiterPair = DelimiterPair { open: '{', close: '}' };
    pub const PARENTHESES: DelimiterPair = DelimiterPair { open: '(', close: ')' };
    pub const BRACKETS: DelimiterPair = DelimiterPair { open: '[', close: ']' };
}

impl Default for DelimiterPair {
    fn default() -> Self {
        Self::BRACES
    }
}

/// Scans forward from `start` and returns the index just past the line
/// that closes the nesting opened at or after `start`.
///
/// Per line, the depth counter gains the number of opening delimiters and
/// loses the number of closing delimiters. Once an opening delimiter has
/// been seen, the first line whose closing delimiter brings the counter
/// back to exactly zero ends the block. At most `window` lines are
/// examined, clipped to the end of the document.
///
/// # Errors
///
/// * `RewriteError::NoOpeningFound` if no opening delimiter appears
///   within the window.
/// * `RewriteError::BoundsExceeded` if the window is exhausted before the
///   depth returns to zero.
pub fn scan_block_extent(
    doc: &SourceDocument,
    start: usize,
    window: usize,
    delims: DelimiterPair,
) -> Result<usize, RewriteError> {
    let limit = doc.len().min(start.saturating_add(window));
    let mut depth: isize = 0;
    let mut opening_seen = false;

    for index in start..limit {
        let line = &doc.lines()[index];
        let opens = line.matches(delims.open).count();
        let closes = line.matches(delims.close).count();
        if opens > 0 {
            opening_seen = true;
        }
        depth += opens as isize;
        depth -= closes as isize;
        // The depth only "returns to zero" on a line that closes something;
        // delimiter-free lines before the first opening stay ineligible.
        if closes > 0 && opening_seen && depth == 0 {
            log::debug!("depth balanced at line {}, block is {}..{}", index, start, index + 1);
            return Ok(index + 1);
        }
    }

    if opening_seen {
        Err(RewriteError::BoundsExceeded { start, window })
    } else {
        Err(RewriteError::NoOpeningFound { start, window })
    }
}

/// Like `scan_block_extent`, but packages the result as a `Block`
/// beginning at the anchor line.
pub fn scan_block(
    doc: &SourceDocument,
    start: usize,
    window: usize,
    delims: DelimiterPair,
) -> Result<Block, RewriteError> {
    let end = scan_block_extent(doc, start, window, delims)?;
    Ok(Block::new(start, end))
}
