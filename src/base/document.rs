//! In-memory text document as handed over by the editor host.

use std::sync::Arc;

use super::{LineIndex, Position, Span};
use crate::core::text_utils::find_word_boundaries;

/// A text document: URI, full text and a line index over it.
#[derive(Debug, Clone)]
pub struct TextDocument {
    uri: Arc<str>,
    text: String,
    line_index: LineIndex,
}

impl TextDocument {
    pub fn new(uri: impl Into<Arc<str>>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_index = LineIndex::new(&text);
        Self {
            uri: uri.into(),
            text,
            line_index,
        }
    }

    pub fn uri(&self) -> &Arc<str> {
        &self.uri
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the full text, rebuilding the line index.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.line_index = LineIndex::new(&self.text);
    }

    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Text of line `line` without its line terminator.
    pub fn line(&self, line: usize) -> Option<&str> {
        let (start, end) = self.line_index.line_bounds(&self.text, line)?;
        Some(&self.text[start..end])
    }

    pub fn position_at(&self, offset: usize) -> Position {
        self.line_index.position_at(&self.text, offset)
    }

    pub fn offset_at(&self, position: Position) -> usize {
        self.line_index.offset_at(&self.text, position)
    }

    /// Text covered by `span`.
    pub fn text_in(&self, span: Span) -> &str {
        let start = self.offset_at(span.start);
        let end = self.offset_at(span.end).max(start);
        &self.text[start..end]
    }

    /// Text of the cursor's line up to (not including) the cursor.
    pub fn line_prefix(&self, position: Position) -> Option<String> {
        let line = self.line(position.line)?;
        Some(line.chars().take(position.column).collect())
    }

    /// Span of the identifier under `position`, if any.
    ///
    /// A cursor placed directly after the last character of a word still
    /// counts as being on that word.
    pub fn word_range_at(&self, position: Position) -> Option<Span> {
        let line = self.line(position.line)?;
        let chars: Vec<char> = line.chars().collect();
        let (start, end) = find_word_boundaries(&chars, position.column).or_else(|| {
            position
                .column
                .checked_sub(1)
                .and_then(|prev| find_word_boundaries(&chars, prev))
        })?;
        Some(Span::from_coords(position.line, start, position.line, end))
    }
}
