// crates/source_document/src/lib.rs

//! Shared value types for the block-rewriting tool-chain.

use std::fmt;

/// A source file held as an ordered sequence of text lines.
///
/// Each line retains its trailing terminator (`\n`, or `\r\n` as part of the
/// line text), so rendering a document is the exact concatenation of its
/// lines. Documents are immutable values: every transformation produces a
/// new `SourceDocument` and leaves its input untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    lines: Vec<String>,
}

impl SourceDocument {
    /// Splits `text` into terminator-retaining lines.
    ///
    /// The final line is kept exactly as read: if the input does not end
    /// with a newline, neither does the parsed document, so
    /// `SourceDocument::parse(text).render() == text` for any input.
    pub fn parse(text: &str) -> Self {
        let lines = text.split_inclusive('\n').map(str::to_string).collect();
        Self { lines }
    }

    /// Builds a document from already-terminated lines. The caller is
    /// responsible for each line carrying its own terminator; no
    /// normalization is performed.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// All lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The line at `index`, if any.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Concatenates the lines back into the full document text.
    pub fn render(&self) -> String {
        self.lines.concat()
    }
}

impl fmt::Display for SourceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// A contiguous line range `[start, end)` treated as one logical unit to
/// replace or remove.
///
/// When produced by the balance scanner, `start` is an anchor index and
/// `end` is the index just past the line whose closing delimiter first
/// returns the nesting depth to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
}

impl Block {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of lines covered by the block.
    pub fn line_count(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Literal lines that will occupy a block's range in the output document.
/// An empty replacement removes the block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacement {
    lines: Vec<String>,
}

impl Replacement {
    /// The empty replacement (block removal).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Splits `text` into terminated lines. Unlike `SourceDocument::parse`,
    /// a missing final terminator gets a `\n` appended, so the replacement
    /// can be spliced ahead of other lines without merging into them.
    pub fn from_text(text: &str) -> Self {
        let mut lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
        if let Some(last) = lines.last_mut() {
            if !last.ends_with('\n') {
                last.push('\n');
            }
        }
        Self { lines }
    }

    /// Builds a replacement from individual lines, appending `\n` to any
    /// line that lacks a terminator.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines
            .into_iter()
            .map(|line| {
                let mut line = line.into();
                if !line.ends_with('\n') {
                    line.push('\n');
                }
                line
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Error kinds for a rewrite run. Any of these aborts the run before the
/// target file is written, leaving it byte-identical to its pre-run state.
/// Line values are zero-based indices into the document.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// The literal marker was not found on any line of the document.
    #[error("marker '{marker}' not found on any line")]
    AnchorNotFound { marker: String },
    /// No opening delimiter appeared within the scan window.
    #[error("no opening delimiter within {window} lines starting at line {start}")]
    NoOpeningFound { start: usize, window: usize },
    /// The scan window was exhausted before the nesting depth returned to
    /// zero.
    #[error("block starting at line {start} did not close within the {window}-line window")]
    BoundsExceeded { start: usize, window: usize },
    /// The target could not be read or written; propagated unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
