//! Per-document scope and symbol tables.
//!
//! The manager owns, for each open document, the scopes and symbols found by
//! the last full scan, plus a by-name index across all documents. Tables are
//! rebuilt from scratch on every scan; [`SymbolManager::clear_document_symbols`]
//! must run first so stale entries do not linger in the name index.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{Scope, ScopeId, ScopeKind, Symbol};
use crate::base::{FileId, Position};

/// Scopes, symbols and the open-scope stack of one document.
#[derive(Debug)]
struct DocumentTable {
    /// Arena of scopes; index 0 is the root global scope
    scopes: Vec<Scope>,
    /// Symbols in registration order
    symbols: Vec<Arc<Symbol>>,
    /// Open scopes for `push_scope`/`pop_scope`
    stack: Vec<ScopeId>,
}

impl DocumentTable {
    fn new() -> Self {
        Self {
            scopes: vec![Scope::global()],
            symbols: Vec::new(),
            stack: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SymbolManager {
    documents: FxHashMap<FileId, DocumentTable>,
    /// All symbols of all documents, by name
    by_name: FxHashMap<SmolStr, Vec<Arc<Symbol>>>,
}

impl SymbolManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn table_mut(&mut self, file: FileId) -> &mut DocumentTable {
        self.documents.entry(file).or_insert_with(DocumentTable::new)
    }

    // ============================================================
    // Scopes
    // ============================================================

    /// Register a scope and return its id.
    ///
    /// Ranges are not validated; callers supply well-formed, non-empty spans
    /// nested inside their parent.
    pub fn add_scope(&mut self, file: FileId, mut scope: Scope) -> ScopeId {
        let table = self.table_mut(file);
        let id = ScopeId::new(table.scopes.len() as u32);
        scope.id = id;
        tracing::trace!(
            "[SCOPES] {file}: add {} {:?} parent={:?}",
            scope.kind,
            scope.span,
            scope.parent
        );
        table.scopes.push(scope);
        id
    }

    /// Register a scope as a child of the innermost open scope and open it.
    pub fn push_scope(&mut self, file: FileId, mut scope: Scope) -> ScopeId {
        if let Some(&top) = self.table_mut(file).stack.last() {
            scope.parent = Some(top);
        }
        let id = self.add_scope(file, scope);
        self.table_mut(file).stack.push(id);
        id
    }

    /// Close the innermost open scope.
    pub fn pop_scope(&mut self, file: FileId) -> Option<ScopeId> {
        self.documents.get_mut(&file)?.stack.pop()
    }

    /// The innermost open scope, if any.
    pub fn current_scope(&self, file: FileId) -> Option<&Scope> {
        let table = self.documents.get(&file)?;
        let id = table.stack.last()?;
        table.scopes.get(id.index())
    }

    pub fn scope(&self, file: FileId, id: ScopeId) -> Option<&Scope> {
        self.documents.get(&file)?.scopes.get(id.index())
    }

    /// Registered scopes of a document, root excluded, in registration order.
    pub fn document_scopes(&self, file: FileId) -> &[Scope] {
        self.documents
            .get(&file)
            .map(|t| &t.scopes[1..])
            .unwrap_or(&[])
    }

    /// The most specific scope containing `position`.
    ///
    /// Candidates are ordered by line span (smallest first), then by kind
    /// specificity (highest first); among equal candidates the earliest
    /// registered wins. Falls back to the whole-document global scope.
    pub fn find_scope(&self, file: FileId, position: Position) -> Scope {
        let Some(table) = self.documents.get(&file) else {
            return Scope::global();
        };

        table.scopes[1..]
            .iter()
            .filter(|scope| scope.span.contains(position))
            .min_by(|a, b| {
                a.span
                    .line_span()
                    .cmp(&b.span.line_span())
                    .then(b.kind.specificity().cmp(&a.kind.specificity()))
            })
            .cloned()
            .unwrap_or_else(|| table.scopes[0].clone())
    }

    /// Nesting depth of `scope` within `file` (root and parentless scopes are 0).
    pub fn scope_depth(&self, file: FileId, scope: &Scope) -> usize {
        let Some(table) = self.documents.get(&file) else {
            return 0;
        };
        let mut depth = 0;
        let mut current = scope.parent;
        while let Some(id) = current {
            depth += 1;
            current = table.scopes.get(id.index()).and_then(|s| s.parent);
            if depth > table.scopes.len() {
                break;
            }
        }
        depth
    }

    // ============================================================
    // Symbols
    // ============================================================

    pub fn add_symbol(&mut self, file: FileId, symbol: Symbol) -> Arc<Symbol> {
        let symbol = Arc::new(symbol);
        tracing::trace!(
            "[SYMBOLS] {file}: add {}: {} in {}",
            symbol.name,
            symbol.ty,
            symbol.scope.kind
        );
        self.table_mut(file).symbols.push(Arc::clone(&symbol));
        self.by_name
            .entry(symbol.name.clone())
            .or_default()
            .push(Arc::clone(&symbol));
        symbol
    }

    /// Symbols of a document in registration order.
    pub fn document_symbols(&self, file: FileId) -> &[Arc<Symbol>] {
        self.documents
            .get(&file)
            .map(|t| t.symbols.as_slice())
            .unwrap_or(&[])
    }

    /// Best symbol named `name` visible at `position`, across all documents.
    pub fn get_symbol(&self, name: &str, position: Position) -> Option<Arc<Symbol>> {
        let candidates = self.by_name.get(name)?;
        self.best_visible(candidates.iter(), position)
    }

    /// Best symbol named `name` visible at `position` within `file`.
    pub fn get_symbol_in(
        &self,
        file: FileId,
        name: &str,
        position: Position,
    ) -> Option<Arc<Symbol>> {
        let candidates = self.by_name.get(name)?;
        self.best_visible(candidates.iter().filter(|s| s.file == file), position)
    }

    /// One symbol per name visible at `position` within `file`, by name.
    pub fn visible_symbols(&self, file: FileId, position: Position) -> Vec<Arc<Symbol>> {
        let mut names: Vec<&SmolStr> = self
            .document_symbols(file)
            .iter()
            .map(|s| &s.name)
            .collect();
        names.sort();
        names.dedup();
        names
            .into_iter()
            .filter_map(|name| self.get_symbol_in(file, name, position))
            .collect()
    }

    /// Pick the first visible candidate after ordering by: constants, then
    /// globals, then deeper scope, then more specific scope kind.
    fn best_visible<'a>(
        &self,
        candidates: impl Iterator<Item = &'a Arc<Symbol>>,
        position: Position,
    ) -> Option<Arc<Symbol>> {
        candidates
            .filter(|symbol| self.is_in_scope(symbol, position))
            .map(|symbol| (self.scope_depth(symbol.file, &symbol.scope), symbol))
            .min_by(|(a_depth, a), (b_depth, b)| {
                b.is_constant
                    .cmp(&a.is_constant)
                    .then(b.is_global.cmp(&a.is_global))
                    .then(b_depth.cmp(a_depth))
                    .then(b.scope.kind.specificity().cmp(&a.scope.kind.specificity()))
            })
            .map(|(_, symbol)| Arc::clone(symbol))
    }

    /// Whether `symbol` can be referenced at `position`.
    ///
    /// Constants and globals are visible anywhere after their declaration.
    /// Everything else must be declared before `position` inside a scope
    /// containing it; parameters only inside their function's scope.
    pub fn is_in_scope(&self, symbol: &Symbol, position: Position) -> bool {
        let declared_before = symbol.span.start.is_before(position);
        if symbol.is_unscoped() {
            return declared_before;
        }
        if !declared_before || !symbol.scope.span.contains(position) {
            return false;
        }
        if symbol.is_parameter {
            return symbol.scope.kind == ScopeKind::Function;
        }
        true
    }

    /// Drop every scope and symbol recorded for `file`.
    pub fn clear_document_symbols(&mut self, file: FileId) {
        let Some(table) = self.documents.remove(&file) else {
            return;
        };
        for symbol in &table.symbols {
            if let Some(list) = self.by_name.get_mut(&symbol.name) {
                list.retain(|s| !Arc::ptr_eq(s, symbol));
                if list.is_empty() {
                    self.by_name.remove(&symbol.name);
                }
            }
        }
        tracing::debug!(
            "[SYMBOLS] {file}: cleared {} symbols, {} scopes",
            table.symbols.len(),
            table.scopes.len() - 1
        );
    }

    pub fn has_document(&self, file: FileId) -> bool {
        self.documents.contains_key(&file)
    }
}
