//! Error types for the documentation store.

use thiserror::Error;

/// Errors raised while loading or rendering built-in documentation.
#[derive(Debug, Error)]
pub enum DocError {
    /// The documentation table is not valid JSON for the expected shape.
    #[error("Invalid documentation table: {0}")]
    Load(#[from] serde_json::Error),

    /// Writing markdown into the output buffer failed.
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}
