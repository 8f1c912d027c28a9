//! String type tags produced by inference.
//!
//! Tags are plain strings: a primitive name, `vector<T>`, `matrix<T>`,
//! `list<T>`, a simulation class name, or [`UNKNOWN`].

pub const UNKNOWN: &str = "unknown";
pub const INTEGER: &str = "integer";
pub const FLOAT: &str = "float";
pub const STRING: &str = "string";
pub const LOGICAL: &str = "logical";
pub const NULL: &str = "NULL";
pub const MIXED: &str = "mixed";
pub const FUNCTION: &str = "function";
pub const LIST: &str = "list";
pub const PROBABILITY: &str = "float<probability>";

pub fn is_numeric(tag: &str) -> bool {
    tag == INTEGER || tag == FLOAT
}

/// Element type of a `vector<T>` tag.
pub fn vector_element(tag: &str) -> Option<&str> {
    tag.strip_prefix("vector<")?.strip_suffix('>')
}

/// Element type of a `vector<T>`, `matrix<T>` or `list<T>` tag.
pub fn collection_element(tag: &str) -> Option<&str> {
    ["vector<", "matrix<", "list<"]
        .iter()
        .find_map(|prefix| tag.strip_prefix(prefix)?.strip_suffix('>'))
}

pub fn is_collection(tag: &str) -> bool {
    matches!(tag, "vector" | "matrix" | LIST) || collection_element(tag).is_some()
}

/// The class name behind a tag: `Individual`, `vector<Individual>` and
/// the documentation style `Individual[]` all name `Individual`.
pub fn class_name(tag: &str) -> &str {
    let inner = collection_element(tag).unwrap_or(tag);
    inner.strip_suffix("[]").unwrap_or(inner)
}
