//! Export orchestration
//!
//! This module provides the top-level export flow:
//! - Export coordination ([`ExportCoordinator`])
//! - Summary and reporting ([`ExportSummary`])

pub mod coordinator;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use summary::{ExportIssue, ExportIssueType, ExportSummary};
