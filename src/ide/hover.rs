//! Hover information implementation.

use std::fmt::Write;

use crate::base::{Position, Span};
use crate::docs::{self, DocError};
use crate::semantic::{Symbol, type_tag};

use super::IdeContext;

/// One rich-text (markdown) block of a hover card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverBlock {
    pub markdown: String,
}

impl HoverBlock {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
        }
    }
}

/// Hover payload: a single block, or several for composite cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverContents {
    Single(HoverBlock),
    Multi(Vec<HoverBlock>),
}

impl HoverContents {
    pub fn blocks(&self) -> &[HoverBlock] {
        match self {
            HoverContents::Single(block) => std::slice::from_ref(block),
            HoverContents::Multi(blocks) => blocks,
        }
    }

    /// All blocks joined with horizontal rules.
    pub fn to_markdown(&self) -> String {
        self.blocks()
            .iter()
            .map(|b| b.markdown.as_str())
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")
    }
}

/// Result of a hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    pub contents: HoverContents,
    /// Range the hover is anchored to (the hovered word)
    pub range: Option<Span>,
}

impl HoverResult {
    fn from_blocks(mut blocks: Vec<HoverBlock>, range: Option<Span>) -> Option<Self> {
        let contents = match blocks.len() {
            0 => return None,
            1 => HoverContents::Single(blocks.remove(0)),
            _ => HoverContents::Multi(blocks),
        };
        Some(Self { contents, range })
    }
}

/// Get hover information for a position.
///
/// Lookup order:
/// 1. `receiver.word`: the method or property of the receiver's class
/// 2. a user symbol visible at the word, plus its class documentation
/// 3. a built-in function, or a class named by the word
///
/// Returns `Ok(None)` when nothing is known about the word.
pub(crate) fn hover(
    ctx: &IdeContext<'_>,
    position: Position,
) -> Result<Option<HoverResult>, DocError> {
    let Some(range) = ctx.document.word_range_at(position) else {
        return Ok(None);
    };
    let word = ctx.document.text_in(range);
    if word.trim().is_empty() {
        return Ok(None);
    }
    tracing::trace!("[HOVER] {}: '{word}' at {position:?}", ctx.file);

    let mut blocks = Vec::new();

    let prefix = ctx.document.line_prefix(range.start).unwrap_or_default();
    if let Some(receiver) = receiver_before(&prefix) {
        if let Some(class) = ctx.receiver_class(receiver, range.start) {
            if let Some(block) = member_block(ctx, &class, word)? {
                blocks.push(block);
                return Ok(HoverResult::from_blocks(blocks, Some(range)));
            }
        }
    } else if let Some(symbol) = ctx.manager.get_symbol_in(ctx.file, word, range.end) {
        blocks.push(HoverBlock::new(format_symbol(&symbol)?));
        let class = type_tag::class_name(&symbol.ty);
        if let Some(object) = ctx.docs.object(class) {
            blocks.push(HoverBlock::new(docs::format_object(class, object)?));
        }
        return Ok(HoverResult::from_blocks(blocks, Some(range)));
    }

    if let Some(function) = ctx.docs.function(word) {
        blocks.push(HoverBlock::new(docs::format_callable(function)?));
    } else if let Some(object) = ctx.docs.object(word) {
        blocks.push(HoverBlock::new(docs::format_object(word, object)?));
    }

    Ok(HoverResult::from_blocks(blocks, Some(range)))
}

/// The receiver of a `receiver.` immediately preceding the hovered word.
fn receiver_before(prefix: &str) -> Option<&str> {
    let before = prefix.strip_suffix('.')?;
    let receiver = crate::core::text_utils::trailing_word(before);
    (!receiver.is_empty()).then_some(receiver)
}

fn member_block(
    ctx: &IdeContext<'_>,
    class: &str,
    member: &str,
) -> Result<Option<HoverBlock>, DocError> {
    if let Some(method) = ctx.docs.method(class, member) {
        let mut text = String::new();
        write!(text, "```eidos\n{class}.{member}()\n```\n\n")?;
        text.push_str(&docs::format_callable(method)?);
        return Ok(Some(HoverBlock::new(text)));
    }
    if let Some(property) = ctx.docs.property(class, member) {
        return Ok(Some(HoverBlock::new(docs::format_property(
            class, member, property,
        )?)));
    }
    Ok(None)
}

/// Render a user symbol: signature line, scope, value and flags.
fn format_symbol(symbol: &Symbol) -> Result<String, DocError> {
    let mut out = String::new();
    if symbol.ty == type_tag::FUNCTION {
        let signature = symbol.value.as_deref().unwrap_or("function()");
        write!(out, "```eidos\n{}: {signature}\n```\n\n", symbol.name)?;
        write!(out, "User-defined function")?;
        return Ok(out);
    }

    write!(out, "```eidos\n{}: {}\n```\n\n", symbol.name, symbol.ty)?;
    write!(out, "**Scope:** {}", symbol.scope.describe())?;

    if let Some(ref value) = symbol.value {
        write!(out, "\n\n**Value:** `{value}`")?;
    }

    let mut tags = Vec::new();
    if symbol.is_constant {
        tags.push("constant");
    }
    if symbol.is_global {
        tags.push("global");
    }
    if symbol.is_parameter {
        tags.push("parameter");
    }
    if !tags.is_empty() {
        write!(out, "\n\n*{}*", tags.join(", "))?;
    }
    Ok(out)
}
