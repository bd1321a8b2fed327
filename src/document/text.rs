//! Byte offset <-> LSP position conversion.
//!
//! LSP positions are line/column pairs with columns in UTF-16 code units,
//! while the error line resolver works in byte offsets. `LineIndex` holds
//! the line-start table; the source text is passed in per call so document
//! state keeps a single copy of it.

use std::ops::Range;

use tower_lsp::lsp_types::Position;

/// Pre-computed table of line start offsets.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset where each line starts; always begins with 0.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build the line-start table for `source`.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.bytes().enumerate().filter_map(|(i, b)| {
            if b == b'\n' {
                Some(i + 1)
            } else {
                None
            }
        }));
        Self { line_starts }
    }

    /// Convert a byte offset into `source` to an LSP position.
    ///
    /// Offsets past the end of the text clamp to the end of the last line,
    /// which matters for ranges that include a terminator unit the text
    /// does not actually contain.
    pub fn offset_to_position(&self, source: &str, offset: usize) -> Position {
        let offset = offset.min(source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insertion) => insertion - 1,
        };

        let line_start = self.line_starts[line];
        let character = source[line_start..offset]
            .chars()
            .map(|c| c.len_utf16() as u32)
            .sum();

        Position::new(line as u32, character)
    }

    /// Convert an LSP position to a byte offset into `source`.
    ///
    /// A column at or past the end of the line maps to the line end
    /// (before its terminator); a line past the end of the document maps
    /// to `None`.
    pub fn position_to_offset(&self, source: &str, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let line_start = *self.line_starts.get(line)?;
        let line_end = self
            .line_starts
            .get(line + 1)
            .map(|&next| next - 1)
            .unwrap_or(source.len());

        let mut utf16_col = 0u32;
        for (i, c) in source[line_start..line_end].char_indices() {
            if utf16_col >= position.character {
                return Some(line_start + i);
            }
            utf16_col += c.len_utf16() as u32;
        }
        Some(line_end)
    }

    /// Convert a byte offset range to an LSP range.
    pub fn span_to_range(&self, source: &str, span: &Range<usize>) -> tower_lsp::lsp_types::Range {
        tower_lsp::lsp_types::Range::new(
            self.offset_to_position(source, span.start),
            self.offset_to_position(source, span.end),
        )
    }
}
