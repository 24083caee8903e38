//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod tables;
pub mod validate;
