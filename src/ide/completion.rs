//! Completion suggestions implementation.

use std::sync::Arc;

use crate::base::Position;
use crate::core::text_utils::{member_access_at_end, trailing_word};
use crate::docs::{self, DocError};
use crate::semantic::{Symbol, type_tag};

use super::IdeContext;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Function,
    Method,
    Property,
    Variable,
    Constant,
    Class,
    Keyword,
    Snippet,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Method => 2,
            CompletionKind::Function => 3,
            CompletionKind::Variable => 6,
            CompletionKind::Class => 7,
            CompletionKind::Property => 10,
            CompletionKind::Keyword => 14,
            CompletionKind::Snippet => 15,
            CompletionKind::Constant => 21,
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// The text shown in the list.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation markdown (shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Snippet to insert instead of the label, with `${n:name}` placeholders.
    pub insert_text: Option<Arc<str>>,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the documentation.
    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Set the insert text.
    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    /// Create from a user symbol.
    pub fn from_symbol(symbol: &Symbol) -> Self {
        let kind = if symbol.ty == type_tag::FUNCTION {
            CompletionKind::Function
        } else if symbol.is_constant {
            CompletionKind::Constant
        } else {
            CompletionKind::Variable
        };

        let detail = match symbol.value {
            Some(ref signature) if kind == CompletionKind::Function => signature.clone(),
            _ => symbol.ty.to_string(),
        };
        Self::new(symbol.name.as_str(), kind).with_detail(detail)
    }
}

/// Completion context derived from the text before the cursor.
#[derive(Debug, PartialEq, Eq)]
enum CompletionContext<'a> {
    /// After `receiver.`, with the partially typed member
    MemberAccess { receiver: &'a str, partial: &'a str },
    /// Anywhere else, with the partially typed word
    General { partial: &'a str },
}

fn determine_context(prefix: &str) -> CompletionContext<'_> {
    match member_access_at_end(prefix) {
        Some((receiver, partial)) => CompletionContext::MemberAccess { receiver, partial },
        None => CompletionContext::General {
            partial: trailing_word(prefix),
        },
    }
}

/// Get completion suggestions at a position.
///
/// After `receiver.` the receiver's class members are offered; elsewhere
/// built-in functions, visible user symbols and keyword snippets. Items
/// are filtered by the typed prefix, deduplicated by label (user symbols
/// shadow built-ins) and sorted by label.
pub(crate) fn completions(
    ctx: &IdeContext<'_>,
    position: Position,
) -> Result<Vec<CompletionItem>, DocError> {
    let Some(prefix) = ctx.document.line_prefix(position) else {
        return Ok(Vec::new());
    };

    let mut items = Vec::new();
    match determine_context(&prefix) {
        CompletionContext::MemberAccess { receiver, partial } => {
            tracing::trace!("[COMPLETION] {}: member of '{receiver}'", ctx.file);
            if let Some(class) = ctx.receiver_class(receiver, position) {
                member_completions(ctx, &class, partial, &mut items)?;
            }
        }
        CompletionContext::General { partial } => {
            if ctx.config.user_symbol_completions {
                items.extend(
                    ctx.manager
                        .visible_symbols(ctx.file, position)
                        .iter()
                        .filter(|s| s.name.starts_with(partial))
                        .map(|s| CompletionItem::from_symbol(s)),
                );
            }
            function_completions(ctx, partial, &mut items)?;
            if ctx.config.keyword_snippets {
                items.extend(
                    keyword_completions()
                        .into_iter()
                        .filter(|k| k.label.starts_with(partial)),
                );
            }
        }
    }

    items.sort_by(|a, b| {
        a.label
            .to_lowercase()
            .cmp(&b.label.to_lowercase())
            .then_with(|| a.label.cmp(&b.label))
    });
    items.dedup_by(|a, b| a.label == b.label);
    Ok(items)
}

fn function_completions(
    ctx: &IdeContext<'_>,
    partial: &str,
    items: &mut Vec<CompletionItem>,
) -> Result<(), DocError> {
    for (name, doc) in ctx.docs.functions().filter(|(n, _)| n.starts_with(partial)) {
        let mut item = CompletionItem::new(name, CompletionKind::Function)
            .with_detail(format!("(function) {name}"))
            .with_documentation(docs::format_callable(doc)?);
        if !doc.parameters.is_empty() {
            item = item.with_insert_text(docs::callable_snippet(name, doc));
        }
        items.push(item);
    }
    Ok(())
}

fn member_completions(
    ctx: &IdeContext<'_>,
    class: &str,
    partial: &str,
    items: &mut Vec<CompletionItem>,
) -> Result<(), DocError> {
    let Some(object) = ctx.docs.object(class) else {
        return Ok(());
    };

    for (name, method) in object.methods.iter().filter(|(n, _)| n.starts_with(partial)) {
        let mut item = CompletionItem::new(name.as_str(), CompletionKind::Method)
            .with_detail(format!("(method) {class}.{name}"))
            .with_documentation(docs::format_callable(method)?);
        if !method.parameters.is_empty() {
            item = item.with_insert_text(docs::callable_snippet(name, method));
        }
        items.push(item);
    }

    for (name, property) in object.properties.iter().filter(|(n, _)| n.starts_with(partial)) {
        let detail = match property.returns {
            Some(ref returns) => format!("(property) {class}.{name}: {returns}"),
            None => format!("(property) {class}.{name}"),
        };
        items.push(
            CompletionItem::new(name.as_str(), CompletionKind::Property)
                .with_detail(detail)
                .with_documentation(docs::format_property(class, name, property)?),
        );
    }
    Ok(())
}

/// Get keyword, literal and callback-block completions.
fn keyword_completions() -> Vec<CompletionItem> {
    let keywords = [
        ("if", "if (${1:condition}) {\n\t$0\n}"),
        ("else", "else {\n\t$0\n}"),
        ("for", "for (${1:x} in ${2:seq}) {\n\t$0\n}"),
        ("while", "while (${1:condition}) {\n\t$0\n}"),
        ("do", "do {\n\t$0\n} while (${1:condition});"),
        ("function", "function (${1:void})${2:name}(${3}) {\n\t$0\n}"),
        ("return", "return ${1:value};"),
        ("next", "next;"),
        ("break", "break;"),
    ];
    let callbacks = [
        ("initialize", "initialize() {\n\t$0\n}"),
        ("first", "${1:1} first() {\n\t$0\n}"),
        ("early", "${1:1} early() {\n\t$0\n}"),
        ("late", "${1:1} late() {\n\t$0\n}"),
        ("fitness", "fitness(${1:m1}) {\n\treturn ${2:1.0};\n}"),
        ("mutationEffect", "mutationEffect(${1:m1}) {\n\treturn ${2:effect};\n}"),
        ("interaction", "interaction(${1:i1}) {\n\treturn ${2:strength};\n}"),
        ("mateChoice", "mateChoice(${1:p1}) {\n\treturn ${2:weights};\n}"),
        ("modifyChild", "modifyChild(${1:p1}) {\n\treturn ${2:T};\n}"),
        ("reproduction", "reproduction(${1:p1}) {\n\t$0\n}"),
        ("mutation", "mutation(${1:m1}) {\n\treturn ${2:T};\n}"),
        ("recombination", "recombination(${1:p1}) {\n\treturn ${2:F};\n}"),
        ("survival", "survival(${1:p1}) {\n\treturn ${2:NULL};\n}"),
    ];
    let literals = ["T", "F", "NULL", "INF", "NAN"];

    let keyword_items = keywords.iter().map(|(label, snippet)| {
        CompletionItem::new(*label, CompletionKind::Keyword).with_insert_text(*snippet)
    });
    let callback_items = callbacks.iter().map(|(label, snippet)| {
        CompletionItem::new(*label, CompletionKind::Snippet)
            .with_detail(format!("{label} callback"))
            .with_insert_text(*snippet)
    });
    let literal_items = literals
        .iter()
        .map(|label| CompletionItem::new(*label, CompletionKind::Keyword));

    keyword_items.chain(callback_items).chain(literal_items).collect()
}
