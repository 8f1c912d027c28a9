//! AnalysisHost and Analysis: Unified state management for IDE features.
//!
//! The `AnalysisHost` owns all mutable state and provides `Analysis` snapshots
//! for querying. Every document change rescans that document eagerly, so a
//! snapshot never observes a half-built symbol table.
//!
//! ## Usage
//!
//! ```
//! use eidos::base::Position;
//! use eidos::ide::AnalysisHost;
//! use tokio_util::sync::CancellationToken;
//!
//! let mut host = AnalysisHost::new();
//! let file = host.open_document("file:///model.slim", "initialize() {\n\tN = 500;\n}\n");
//!
//! let cancel = CancellationToken::new();
//! let analysis = host.analysis();
//! let symbols = analysis.document_symbols(file, &cancel);
//! assert_eq!(symbols[0].name, "N");
//! let hover = analysis.hover(file, Position::new(1, 2), &cancel);
//! assert!(hover.is_some());
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tokio_util::sync::CancellationToken;

use crate::base::{FileId, Position, TextDocument};
use crate::config::AnalysisConfig;
use crate::docs::{DocError, Documentation};
use crate::semantic::{Scope, Symbol, SymbolManager, scan_document, type_tag};

use super::{CompletionItem, HoverResult, LogNotifier, Notifier, SymbolInfo};

/// Receivers that name a class by convention inside callbacks.
const CONVENTIONAL_RECEIVERS: &[(&str, &str)] = &[
    ("individual", "Individual"),
    ("subpop", "Subpopulation"),
    ("genome", "Genome"),
    ("mut", "Mutation"),
];

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `open_document()`, `update_document()` and
/// `close_document()`, then get a consistent snapshot via `analysis()`.
pub struct AnalysisHost {
    /// Open documents
    documents: FxHashMap<FileId, TextDocument>,
    /// Map from document URI to FileId
    file_id_map: FxHashMap<Arc<str>, FileId>,
    next_file_id: u32,
    manager: SymbolManager,
    config: AnalysisConfig,
    docs: Arc<Documentation>,
    notifier: Arc<dyn Notifier>,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// Create a host with the default configuration and built-in documentation.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            documents: FxHashMap::default(),
            file_id_map: FxHashMap::default(),
            next_file_id: 0,
            manager: SymbolManager::new(),
            config,
            docs: Documentation::builtin(),
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Replace the documentation table.
    pub fn with_documentation(mut self, docs: Arc<Documentation>) -> Self {
        self.docs = docs;
        self
    }

    /// Replace the message surface formatting failures are reported to.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Register a document and scan it.
    ///
    /// Opening an already open URI replaces its text and keeps its FileId.
    pub fn open_document(&mut self, uri: &str, text: impl Into<String>) -> FileId {
        let file = match self.file_id_map.get(uri) {
            Some(&file) => file,
            None => {
                let file = FileId::new(self.next_file_id);
                self.next_file_id += 1;
                self.file_id_map.insert(Arc::from(uri), file);
                file
            }
        };
        tracing::debug!("[HOST] open {uri} as {file}");
        self.documents.insert(file, TextDocument::new(uri, text));
        self.rescan(file);
        file
    }

    /// Replace a document's text and rescan it, opening it if needed.
    pub fn update_document(&mut self, uri: &str, text: impl Into<String>) -> FileId {
        let Some(&file) = self.file_id_map.get(uri) else {
            return self.open_document(uri, text);
        };
        if let Some(document) = self.documents.get_mut(&file) {
            document.set_text(text);
        }
        self.rescan(file);
        file
    }

    /// Drop a document and everything derived from it.
    ///
    /// Returns false if the URI was not open.
    pub fn close_document(&mut self, uri: &str) -> bool {
        let Some(file) = self.file_id_map.remove(uri) else {
            return false;
        };
        tracing::debug!("[HOST] close {uri}");
        self.documents.remove(&file);
        self.manager.clear_document_symbols(file);
        true
    }

    /// Replace the configuration and rescan every open document.
    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
        let files: Vec<FileId> = self.documents.keys().copied().collect();
        for file in files {
            self.rescan(file);
        }
    }

    fn rescan(&mut self, file: FileId) {
        if let Some(document) = self.documents.get(&file) {
            scan_document(
                &mut self.manager,
                file,
                document,
                self.config.vector_sample_size,
            );
        }
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            documents: &self.documents,
            manager: &self.manager,
            config: &self.config,
            docs: self.docs.as_ref(),
            notifier: self.notifier.as_ref(),
        }
    }

    /// Get the FileId for a URI, if it is open.
    pub fn get_file_id(&self, uri: &str) -> Option<FileId> {
        self.file_id_map.get(uri).copied()
    }

    pub fn document(&self, file: FileId) -> Option<&TextDocument> {
        self.documents.get(&file)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn symbol_manager(&self) -> &SymbolManager {
        &self.manager
    }
}

/// An `AnalysisHost` behind a read-write lock for multi-threaded hosts.
///
/// Document changes take the write lock for the whole rescan; queries share
/// the read lock.
#[derive(Clone, Default)]
pub struct SharedAnalysisHost {
    inner: Arc<RwLock<AnalysisHost>>,
}

impl SharedAnalysisHost {
    pub fn new(host: AnalysisHost) -> Self {
        Self {
            inner: Arc::new(RwLock::new(host)),
        }
    }

    /// Run `f` with exclusive access, e.g. to apply a document change.
    pub fn write<R>(&self, f: impl FnOnce(&mut AnalysisHost) -> R) -> R {
        f(&mut *self.inner.write())
    }

    /// Run `f` against a snapshot.
    pub fn read<R>(&self, f: impl FnOnce(Analysis<'_>) -> R) -> R {
        let host = self.inner.read();
        f(host.analysis())
    }
}

/// Everything a provider needs to answer one request in one document.
pub(crate) struct IdeContext<'a> {
    pub file: FileId,
    pub document: &'a TextDocument,
    pub manager: &'a SymbolManager,
    pub docs: &'a Documentation,
    pub config: &'a AnalysisConfig,
}

impl IdeContext<'_> {
    /// The documented class a receiver name refers to at `position`.
    ///
    /// User symbols take precedence, then conventional callback receivers,
    /// then class names used directly (static members).
    pub fn receiver_class(&self, receiver: &str, position: Position) -> Option<String> {
        if let Some(symbol) = self.manager.get_symbol_in(self.file, receiver, position) {
            let class = type_tag::class_name(&symbol.ty);
            if self.docs.has_object(class) {
                return Some(class.to_string());
            }
        }
        if let Some((_, class)) = CONVENTIONAL_RECEIVERS.iter().find(|(r, _)| *r == receiver) {
            return Some((*class).to_string());
        }
        self.docs.has_object(receiver).then(|| receiver.to_string())
    }
}

/// An immutable snapshot of the analysis state.
///
/// All IDE queries go through this struct to ensure consistent results.
/// Each query checks its cancellation token once, before doing any work.
pub struct Analysis<'a> {
    documents: &'a FxHashMap<FileId, TextDocument>,
    manager: &'a SymbolManager,
    config: &'a AnalysisConfig,
    docs: &'a Documentation,
    notifier: &'a dyn Notifier,
}

impl<'a> Analysis<'a> {
    fn context(&self, file: FileId) -> Option<IdeContext<'a>> {
        Some(IdeContext {
            file,
            document: self.documents.get(&file)?,
            manager: self.manager,
            docs: self.docs,
            config: self.config,
        })
    }

    /// Report a provider failure to the notifier and fall back to `degraded`.
    ///
    /// Providers only fail when a documentation entry cannot be rendered.
    fn degrade<T>(&self, result: Result<T, DocError>, context: &str, degraded: T) -> T {
        result.unwrap_or_else(|err| {
            self.notifier.show_error(&format!("{context}: {err}"));
            degraded
        })
    }

    /// Get hover information at a position.
    ///
    /// Formatting failures are reported to the notifier and yield `None`.
    pub fn hover(
        &self,
        file: FileId,
        position: Position,
        cancel: &CancellationToken,
    ) -> Option<HoverResult> {
        if cancel.is_cancelled() {
            return None;
        }
        let ctx = self.context(file)?;
        self.degrade(super::hover::hover(&ctx, position), "Error creating hover", None)
    }

    /// Get completions at a position.
    ///
    /// `trigger` is the character that opened the request, if any; characters
    /// outside the configured trigger set yield nothing. Formatting failures
    /// are reported to the notifier and yield an empty list.
    pub fn completions(
        &self,
        file: FileId,
        position: Position,
        trigger: Option<char>,
        cancel: &CancellationToken,
    ) -> Vec<CompletionItem> {
        if cancel.is_cancelled() {
            return Vec::new();
        }
        if let Some(c) = trigger {
            if !self.config.is_trigger_character(c) {
                return Vec::new();
            }
        }
        let Some(ctx) = self.context(file) else {
            return Vec::new();
        };
        self.degrade(
            super::completion::completions(&ctx, position),
            "Error providing completions",
            Vec::new(),
        )
    }

    /// Get the outline of a document.
    pub fn document_symbols(&self, file: FileId, cancel: &CancellationToken) -> Vec<SymbolInfo> {
        if cancel.is_cancelled() {
            return Vec::new();
        }
        super::document_symbols(self.manager, file)
    }

    /// The best user symbol named `name` visible at `position`.
    pub fn symbol_at(&self, file: FileId, name: &str, position: Position) -> Option<Arc<Symbol>> {
        self.manager.get_symbol_in(file, name, position)
    }

    /// The most specific scope containing `position`.
    pub fn scope_at(&self, file: FileId, position: Position) -> Scope {
        self.manager.find_scope(file, position)
    }

    pub fn document(&self, file: FileId) -> Option<&'a TextDocument> {
        self.documents.get(&file)
    }
}
