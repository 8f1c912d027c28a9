//! Analysis configuration.
//!
//! Every field has a default, so an empty JSON object (or no configuration
//! at all) yields the stock behavior.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::base::constants::TRIGGER_CHARACTERS;

/// Errors raised while loading an [`AnalysisConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options for scanning and the IDE providers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Characters that trigger completion
    pub trigger_characters: Vec<char>,
    /// Number of leading `c(...)` elements inspected when inferring a vector type
    pub vector_sample_size: usize,
    /// Offer keyword and callback snippets in general completion
    pub keyword_snippets: bool,
    /// Offer user-defined symbols in general completion
    pub user_symbol_completions: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trigger_characters: TRIGGER_CHARACTERS.to_vec(),
            vector_sample_size: 3,
            keyword_snippets: true,
            user_symbol_completions: true,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn is_trigger_character(&self, c: char) -> bool {
        self.trigger_characters.contains(&c)
    }
}
