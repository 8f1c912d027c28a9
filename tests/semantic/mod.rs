//! Semantic layer tests
//!
//! Tests for:
//! - Regex scanning of scopes and symbols
//! - Scope and symbol resolution in the symbol manager
//! - Type inference

pub mod tests_inference;
pub mod tests_scanner;
pub mod tests_symbol_manager;
