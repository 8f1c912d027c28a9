//! Foundation types for the Eidos analysis toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Identifiers for open documents
//! - [`Position`], [`Span`] - Line/column positions for scopes and symbols
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`TextDocument`] - Document text as delivered by the host
//! - Domain constants (trigger characters, known receivers and classes)
//!
//! This module depends only on [`crate::core`] text utilities.

pub mod constants;
mod document;
mod file_id;
mod line_index;
mod position;

pub use document::TextDocument;
pub use file_id::FileId;
pub use line_index::LineIndex;
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size;
