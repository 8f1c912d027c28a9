//! IDE feature tests
//!
//! Tests for:
//! - Hover information
//! - Code completion
//! - Document symbols

pub mod tests_symbols;
