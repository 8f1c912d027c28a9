//! # Semantic Analysis
//!
//! Approximate scope and symbol tracking for Eidos/SLiM scripts.
//!
//! There is no parser here. [`scan_document`] finds callback blocks, braces,
//! assignments and function declarations with regular expressions and feeds
//! them into a [`SymbolManager`], which answers "what is `x` at this
//! position" queries. Types come from [`infer`], a best-effort pattern
//! cascade that is free to answer `unknown`.
//!
//! ```text
//! TextDocument ──scan_document──▶ SymbolManager ◀── find_scope / get_symbol
//!                    │
//!                    └── infer_type (per assignment)
//! ```

pub mod infer;
mod scanner;
mod scope;
mod symbol;
mod symbol_manager;
pub mod type_tag;

pub use infer::{TypeInference, infer_type, infer_vector_type, split_elements};
pub use scanner::{ScanSummary, find_block_range, scan_document};
pub use scope::{CallbackInfo, Scope, ScopeId, ScopeKind};
pub use symbol::Symbol;
pub use symbol_manager::SymbolManager;
