//! Markdown rendering for documentation entries.

use std::fmt::Write;

use super::{CallableDoc, DocError, ObjectDoc, PropertyDoc};

/// Render a function or method entry.
///
/// Layout: description, parameter list, return type, fenced example.
pub fn format_callable(doc: &CallableDoc) -> Result<String, DocError> {
    let mut out = String::new();
    write!(out, "{}\n\n", doc.description)?;

    if !doc.parameters.is_empty() {
        writeln!(out, "**Parameters:**")?;
        for (param, desc) in &doc.parameters {
            writeln!(out, "- `{param}`: {desc}")?;
        }
    }

    if let Some(ref returns) = doc.returns {
        write!(out, "\n**Returns:** {returns}\n")?;
    }

    if let Some(ref example) = doc.example {
        write!(out, "\n**Example:**\n```eidos\n{example}\n```")?;
    }

    Ok(out)
}

/// Render a property entry of `class`.
pub fn format_property(class: &str, name: &str, doc: &PropertyDoc) -> Result<String, DocError> {
    let mut out = String::new();
    write!(out, "```eidos\n{class}.{name}")?;
    if let Some(ref returns) = doc.returns {
        write!(out, " => {returns}")?;
    }
    write!(out, "\n```\n\n{}\n", doc.description)?;
    Ok(out)
}

/// Render a class entry with a summary of its members.
pub fn format_object(class: &str, doc: &ObjectDoc) -> Result<String, DocError> {
    let mut out = String::new();
    write!(out, "**{class}**\n\n{}\n", doc.description)?;

    if !doc.properties.is_empty() {
        write!(out, "\n**Properties:**\n")?;
        for (name, prop) in &doc.properties {
            match prop.returns {
                Some(ref returns) => writeln!(out, "- `{name}` ({returns}): {}", prop.description)?,
                None => writeln!(out, "- `{name}`: {}", prop.description)?,
            }
        }
    }

    if !doc.methods.is_empty() {
        write!(out, "\n**Methods:**\n")?;
        for (name, method) in &doc.methods {
            writeln!(out, "- `{name}()`: {}", method.description)?;
        }
    }

    Ok(out)
}

/// Snippet insert text with one placeholder per documented parameter.
///
/// ```
/// use eidos::docs::{Documentation, callable_snippet};
///
/// let docs = Documentation::builtin();
/// let seq = docs.function("seq").unwrap();
/// assert_eq!(callable_snippet("seq", seq), "seq(${1:from}, ${2:to}, ${3:by})");
/// ```
pub fn callable_snippet(name: &str, doc: &CallableDoc) -> String {
    let params: Vec<String> = doc
        .parameters
        .keys()
        .enumerate()
        .map(|(i, p)| format!("${{{}:{}}}", i + 1, p))
        .collect();
    format!("{}({})", name, params.join(", "))
}
