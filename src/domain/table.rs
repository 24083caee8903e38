//! Table descriptor domain model

use super::ids::TableId;
use serde::{Deserialize, Serialize};

/// Name, identifier and ordered field names of one table in the base
///
/// Re-fetched every run from the metadata endpoint; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Human-assigned table name, unique within the base
    pub name: String,

    /// Remote table identifier
    pub id: TableId,

    /// Field names in schema order
    pub fields: Vec<String>,
}

impl TableDescriptor {
    /// Create a new table descriptor
    pub fn new(name: impl Into<String>, id: TableId, fields: Vec<String>) -> Self {
        Self {
            name: name.into(),
            id,
            fields,
        }
    }

    /// File name of the Markdown document for this table
    ///
    /// Lower-cased, with spaces replaced by underscores.
    ///
    /// ```
    /// use airtable_export::domain::{TableDescriptor, TableId};
    ///
    /// let table = TableDescriptor::new("Pickup Orders", TableId::new("tbl1").unwrap(), vec![]);
    /// assert_eq!(table.document_file_name(), "pickup_orders.md");
    /// ```
    pub fn document_file_name(&self) -> String {
        document_file_name(&self.name)
    }
}

/// Markdown file name for a table name
pub fn document_file_name(table_name: &str) -> String {
    format!("{}.md", table_name.to_lowercase().replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_file_name() {
        assert_eq!(document_file_name("Products"), "products.md");
        assert_eq!(document_file_name("Fee Management"), "fee_management.md");
        assert_eq!(
            document_file_name("Shipping  Orders"),
            "shipping__orders.md"
        );
    }
}
