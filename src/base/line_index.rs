//! Byte offset to line/column conversion.

use text_size::TextSize;

use super::Position;

/// Line start table for a piece of text.
///
/// Columns are counted in `char`s from the start of the line, matching the
/// word extraction in [`crate::core::text_utils`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte range of line `line`, excluding the trailing newline.
    pub fn line_bounds(&self, text: &str, line: usize) -> Option<(usize, usize)> {
        let start = usize::from(*self.line_starts.get(line)?);
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| usize::from(*next) - 1)
            .unwrap_or_else(|| usize::from(self.len));
        let end = if end > start && text.as_bytes().get(end - 1) == Some(&b'\r') {
            end - 1
        } else {
            end
        };
        Some((start, end))
    }

    /// Convert a byte offset into a line/column position.
    ///
    /// Offsets past the end clamp to the end of the text.
    pub fn position_at(&self, text: &str, offset: usize) -> Position {
        let offset = offset.min(usize::from(self.len));
        let line = match self
            .line_starts
            .binary_search(&TextSize::from(offset as u32))
        {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = usize::from(self.line_starts[line]);
        let column = text
            .get(line_start..offset)
            .map(|s| s.chars().count())
            .unwrap_or(offset - line_start);
        Position::new(line, column)
    }

    /// Convert a line/column position into a byte offset.
    ///
    /// Columns past the end of a line clamp to the line end; lines past the
    /// end clamp to the end of the text.
    pub fn offset_at(&self, text: &str, position: Position) -> usize {
        let Some((start, end)) = self.line_bounds(text, position.line) else {
            return usize::from(self.len);
        };
        text[start..end]
            .char_indices()
            .nth(position.column)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }
}
