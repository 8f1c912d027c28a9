//! Shared test helpers.

pub mod fixtures;
pub mod host_helpers;
