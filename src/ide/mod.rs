//! IDE features: High-level APIs for editor host handlers.
//!
//! This module provides the interface between the semantic layer and the
//! editor host. Each query corresponds to one host request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No protocol types**: Uses our own types, converted at the host boundary
//! 3. **Degrade, don't fail**: Formatting errors go to the [`Notifier`]
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use eidos::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! let file = host.open_document("file:///model.slim", "x = 1;");
//!
//! let analysis = host.analysis();
//! let symbols = analysis.document_symbols(file, &cancel);
//! ```

mod analysis;
mod completion;
mod hover;
mod notify;
mod symbols;

pub(crate) use analysis::IdeContext;
pub use analysis::{Analysis, AnalysisHost, SharedAnalysisHost};
pub use completion::{CompletionItem, CompletionKind};
pub use hover::{HoverBlock, HoverContents, HoverResult};
pub use notify::{LogNotifier, Notifier};
pub use symbols::{OutlineKind, SymbolInfo, document_symbols};
