//! Table discovery and schema drift detection

use crate::adapters::airtable::AirtableApi;
use crate::domain::TableDescriptor;
use std::collections::BTreeMap;

/// Expected tables and fields that the base does not have
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDrift {
    /// Expected tables absent from the base
    pub missing_tables: Vec<String>,

    /// Per discovered table, expected fields absent from its schema
    pub missing_fields: BTreeMap<String, Vec<String>>,
}

impl SchemaDrift {
    pub fn is_empty(&self) -> bool {
        self.missing_tables.is_empty() && self.missing_fields.is_empty()
    }

    /// Log the drift as warnings
    pub fn log(&self) {
        if !self.missing_tables.is_empty() {
            tracing::warn!(
                missing = ?self.missing_tables,
                "Some known tables were not found: {}",
                self.missing_tables.join(", ")
            );
        }

        for (table, fields) in &self.missing_fields {
            tracing::warn!(
                table = %table,
                missing = ?fields,
                "Table '{}' is missing expected fields: {}",
                table,
                fields.join(", ")
            );
        }
    }
}

/// Compare discovered tables against the expected table set
pub fn detect_drift(
    tables: &[TableDescriptor],
    expected: &BTreeMap<String, Vec<String>>,
) -> SchemaDrift {
    let missing_tables = expected
        .keys()
        .filter(|name| !tables.iter().any(|t| &t.name == *name))
        .cloned()
        .collect();

    let missing_fields = tables
        .iter()
        .filter_map(|table| {
            let expected_fields = expected.get(&table.name)?;
            let missing: Vec<String> = expected_fields
                .iter()
                .filter(|field| !table.fields.contains(field))
                .cloned()
                .collect();
            (!missing.is_empty()).then(|| (table.name.clone(), missing))
        })
        .collect();

    SchemaDrift {
        missing_tables,
        missing_fields,
    }
}

/// List the base's tables, logging names and drift
///
/// Any failure is logged and yields an empty list.
pub async fn discover_tables(
    api: &dyn AirtableApi,
    expected: &BTreeMap<String, Vec<String>>,
) -> Vec<TableDescriptor> {
    let tables = match api.list_tables().await {
        Ok(tables) => tables,
        Err(e) => {
            tracing::error!(base_id = %api.base_id(), "Error fetching tables: {}", e);
            return Vec::new();
        }
    };

    let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
    tracing::info!(count = tables.len(), "Discovered tables: {}", names.join(", "));

    detect_drift(&tables, expected).log();

    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TableId;

    fn table(name: &str, fields: &[&str]) -> TableDescriptor {
        TableDescriptor::new(
            name,
            TableId::new(format!("tbl{}", name.replace(' ', ""))).unwrap(),
            fields.iter().map(|f| f.to_string()).collect(),
        )
    }

    fn expected() -> BTreeMap<String, Vec<String>> {
        BTreeMap::from([
            (
                "Products".to_string(),
                vec!["Name".to_string(), "Price".to_string()],
            ),
            ("Settings".to_string(), vec!["Key".to_string()]),
        ])
    }

    #[test]
    fn test_no_drift() {
        let tables = vec![
            table("Products", &["Name", "Price", "Image"]),
            table("Settings", &["Key", "Value"]),
        ];
        assert!(detect_drift(&tables, &expected()).is_empty());
    }

    #[test]
    fn test_missing_table() {
        let tables = vec![table("Products", &["Name", "Price"])];
        let drift = detect_drift(&tables, &expected());
        assert_eq!(drift.missing_tables, vec!["Settings".to_string()]);
        assert!(drift.missing_fields.is_empty());
    }

    #[test]
    fn test_missing_fields() {
        let tables = vec![
            table("Products", &["Name"]),
            table("Settings", &["Key"]),
            table("Extras", &[]),
        ];
        let drift = detect_drift(&tables, &expected());
        assert!(drift.missing_tables.is_empty());
        assert_eq!(
            drift.missing_fields.get("Products"),
            Some(&vec!["Price".to_string()])
        );
        assert!(!drift.missing_fields.contains_key("Extras"));
    }
}
