//! Built-in documentation for Eidos functions and SLiM object classes.
//!
//! The table is static reference data embedded at compile time and
//! deserialized once on first use. Lookups are plain map reads; rendering
//! to markdown lives in [`format`].

mod error;
pub mod format;

use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;
use serde::Deserialize;

pub use error::DocError;
pub use format::{callable_snippet, format_callable, format_object, format_property};

const BUILTIN_JSON: &str = include_str!("eidos_docs.json");

static BUILTIN: LazyLock<Arc<Documentation>> = LazyLock::new(|| {
    let docs = Documentation::from_json(BUILTIN_JSON).unwrap_or_else(|err| {
        tracing::error!("built-in documentation failed to load: {err}");
        Documentation::default()
    });
    Arc::new(docs)
});

/// Documentation for a function or method.
///
/// Parameter order is preserved from the source table; it drives the
/// placeholder order of completion snippets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallableDoc {
    pub description: String,
    #[serde(default)]
    pub parameters: IndexMap<String, String>,
    #[serde(default)]
    pub returns: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
}

/// Documentation for an object property.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyDoc {
    pub description: String,
    #[serde(default)]
    pub returns: Option<String>,
}

/// Documentation for a SLiM object class.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectDoc {
    pub description: String,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyDoc>,
    #[serde(default)]
    pub methods: IndexMap<String, CallableDoc>,
}

/// The full documentation table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Documentation {
    #[serde(default)]
    functions: IndexMap<String, CallableDoc>,
    #[serde(default)]
    objects: IndexMap<String, ObjectDoc>,
}

impl Documentation {
    /// Parse a documentation table from JSON.
    pub fn from_json(json: &str) -> Result<Self, DocError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The table shipped with the crate, shared by every caller.
    pub fn builtin() -> Arc<Documentation> {
        Arc::clone(&BUILTIN)
    }

    pub fn function(&self, name: &str) -> Option<&CallableDoc> {
        self.functions.get(name)
    }

    pub fn object(&self, class: &str) -> Option<&ObjectDoc> {
        self.objects.get(class)
    }

    pub fn method(&self, class: &str, name: &str) -> Option<&CallableDoc> {
        self.objects.get(class)?.methods.get(name)
    }

    pub fn property(&self, class: &str, name: &str) -> Option<&PropertyDoc> {
        self.objects.get(class)?.properties.get(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = (&str, &CallableDoc)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn objects(&self) -> impl Iterator<Item = (&str, &ObjectDoc)> {
        self.objects.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn has_object(&self, class: &str) -> bool {
        self.objects.contains_key(class)
    }
}
