//! # eidos-base
//!
//! Editor analysis for Eidos and SLiM simulation scripts: hover
//! documentation, completion and document outlines.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Editor features (hover, completion, outline), AnalysisHost
//!   ↓
//! semantic  → Scopes, symbols, regex scanner, type inference
//!   ↓
//! docs      → Built-in function and class documentation
//!   ↓
//! core      → Text utilities (word boundaries, member access)
//!   ↓
//! base      → Primitives (FileId, Position/Span, LineIndex, TextDocument)
//! ```

// ============================================================================
// MODULES (dependency order: base → core → docs → semantic → ide)
// ============================================================================

/// Foundation types: FileId, Position/Span, LineIndex, TextDocument
pub mod base;

/// Text utilities shared by the providers
pub mod core;

/// Analysis configuration
pub mod config;

/// Built-in documentation store
pub mod docs;

/// Scope and symbol tracking, type inference
pub mod semantic;

/// IDE features: hover, completion, document symbols
pub mod ide;

// Re-export foundation types
pub use base::{FileId, LineIndex, Position, Span, TextDocument};
pub use config::{AnalysisConfig, ConfigError};
pub use ide::{Analysis, AnalysisHost, SharedAnalysisHost};
