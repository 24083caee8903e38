//! Domain models and types for the exporter.
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`TableId`], [`RecordId`])
//! - **Domain models** ([`TableDescriptor`], [`RawRecord`], [`ProcessedRecord`])
//! - **Error types** ([`ExportError`], [`AirtableError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so a table ID can never be passed
//! where a record ID is expected:
//!
//! ```rust
//! use airtable_export::domain::{RecordId, TableId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let table_id = TableId::new("tblProducts")?;
//! let record_id = RecordId::new("rec123")?;
//!
//! // let wrong: TableId = record_id;  // Compile error!
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;
pub mod table;

// Re-export commonly used types for convenience
pub use errors::{AirtableError, ExportError};
pub use ids::{RecordId, TableId};
pub use record::{
    AttachmentDescriptor, FieldValue, ProcessedRecord, RawRecord, CREATED_TIME_FIELD,
    RECORD_ID_FIELD,
};
pub use result::Result;
pub use table::TableDescriptor;
