//! Symbol listing for the document outline.

use smol_str::SmolStr;

use crate::base::constants::SIMULATION_CLASSES;
use crate::base::{FileId, Span};
use crate::semantic::{Symbol, SymbolManager, type_tag};

/// Outline icon category, chosen from a symbol's inferred type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutlineKind {
    Function,
    Number,
    String,
    Boolean,
    Array,
    Class,
    Variable,
}

impl OutlineKind {
    /// Kind for an inferred type tag.
    pub fn from_type(ty: &str) -> Self {
        match ty {
            type_tag::FUNCTION => OutlineKind::Function,
            type_tag::INTEGER | type_tag::FLOAT | type_tag::PROBABILITY => OutlineKind::Number,
            type_tag::STRING => OutlineKind::String,
            type_tag::LOGICAL => OutlineKind::Boolean,
            _ if type_tag::is_collection(ty) => OutlineKind::Array,
            _ if SIMULATION_CLASSES.contains(&ty) => OutlineKind::Class,
            _ => OutlineKind::Variable,
        }
    }

    /// Convert to LSP symbol kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            OutlineKind::Class => 5,
            OutlineKind::Function => 12,
            OutlineKind::Variable => 13,
            OutlineKind::String => 15,
            OutlineKind::Number => 16,
            OutlineKind::Boolean => 17,
            OutlineKind::Array => 18,
        }
    }
}

/// A symbol for the document outline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolInfo {
    /// Symbol name.
    pub name: SmolStr,
    /// `type (scope)` for variables, the signature for functions.
    pub detail: String,
    /// Symbol kind.
    pub kind: OutlineKind,
    /// File containing the symbol.
    pub file: FileId,
    /// Declaration range.
    pub span: Span,
}

impl SymbolInfo {
    pub fn from_symbol(symbol: &Symbol) -> Self {
        let detail = match symbol.value {
            Some(ref signature) if symbol.ty == type_tag::FUNCTION => signature.clone(),
            _ => format!("{} ({})", symbol.ty, symbol.scope.kind),
        };
        Self {
            name: symbol.name.clone(),
            detail,
            kind: OutlineKind::from_type(&symbol.ty),
            file: symbol.file,
            span: symbol.span,
        }
    }
}

/// Get all symbols in a specific file for document outline.
///
/// Function parameters are left out. Results are in source order.
pub fn document_symbols(manager: &SymbolManager, file: FileId) -> Vec<SymbolInfo> {
    let mut results: Vec<SymbolInfo> = manager
        .document_symbols(file)
        .iter()
        .filter(|sym| !sym.is_parameter)
        .map(|sym| SymbolInfo::from_symbol(sym))
        .collect();

    // Sort by position in file
    results.sort_by(|a, b| a.span.start.cmp(&b.span.start));
    results
}
