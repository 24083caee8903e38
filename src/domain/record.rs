//! Record domain models
//!
//! A [`RawRecord`] is the snapshot returned by the records endpoint. After
//! normalization and schema completion it becomes a [`ProcessedRecord`],
//! whose values are either printable text or a list of downloaded
//! attachments.

use super::ids::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Column holding the remote record identifier
pub const RECORD_ID_FIELD: &str = "Record ID";

/// Column holding the raw creation timestamp
pub const CREATED_TIME_FIELD: &str = "Created Time";

/// A record as returned by the Airtable records endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Remote record identifier
    pub id: RecordId,

    /// Creation timestamp (ISO-8601), if the API supplied one
    #[serde(rename = "createdTime", default)]
    pub created_time: Option<String>,

    /// Field name to raw JSON value
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// A downloaded (or attempted) attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    /// Original filename reported by the API
    pub filename: String,

    /// URL the file was fetched from
    pub original_url: String,

    /// Local path after download, `None` if every attempt failed
    pub local_path: Option<PathBuf>,
}

impl AttachmentDescriptor {
    /// Whether the file is available on local disk
    pub fn is_downloaded(&self) -> bool {
        self.local_path.is_some()
    }
}

/// A normalized field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Printable text (plain, reformatted date, or JSON-encoded)
    Text(String),

    /// Attachment collection
    Attachments(Vec<AttachmentDescriptor>),
}

impl FieldValue {
    /// Empty text value used for schema completion
    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    /// Whether the value carries no content
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Attachments(attachments) => attachments.is_empty(),
        }
    }

    /// Type label shown in the summary document
    pub fn type_label(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "str",
            FieldValue::Attachments(_) => "list",
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// A record whose values have been normalized and schema-completed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    /// Remote record identifier
    pub record_id: RecordId,

    /// Raw creation timestamp, empty when absent; used as the sort key
    pub created_time: String,

    /// Field name to normalized value, including the synthetic
    /// `Record ID` and `Created Time` columns
    pub fields: BTreeMap<String, FieldValue>,
}

impl ProcessedRecord {
    /// Create a processed record seeded with the synthetic columns
    pub fn new(record_id: RecordId, created_time: Option<String>) -> Self {
        let created_time = created_time.unwrap_or_default();
        let mut fields = BTreeMap::new();
        fields.insert(
            RECORD_ID_FIELD.to_string(),
            FieldValue::Text(record_id.to_string()),
        );
        fields.insert(
            CREATED_TIME_FIELD.to_string(),
            FieldValue::Text(created_time.clone()),
        );

        Self {
            record_id,
            created_time,
            fields,
        }
    }

    /// Set a field value, replacing any previous value
    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Add an empty value for every expected field that is missing
    pub fn complete_schema<S: AsRef<str>>(&mut self, expected_fields: &[S]) {
        for field in expected_fields {
            self.fields
                .entry(field.as_ref().to_string())
                .or_insert_with(FieldValue::empty);
        }
    }

    /// Iterate over every attachment held by this record
    pub fn attachments(&self) -> impl Iterator<Item = &AttachmentDescriptor> {
        self.fields
            .values()
            .flat_map(|value| -> &[AttachmentDescriptor] {
                match value {
                    FieldValue::Attachments(attachments) => attachments,
                    FieldValue::Text(_) => &[],
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_raw_record_deserialize() {
        let json = r#"{
            "id": "rec123",
            "createdTime": "2024-01-01T00:00:00.000Z",
            "fields": {"Name": "Tea", "Price": 4.5}
        }"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "rec123");
        assert_eq!(
            record.created_time.as_deref(),
            Some("2024-01-01T00:00:00.000Z")
        );
        assert_eq!(record.fields.len(), 2);
    }

    #[test]
    fn test_raw_record_without_fields() {
        let record: RawRecord = serde_json::from_str(r#"{"id": "rec1"}"#).unwrap();
        assert!(record.created_time.is_none());
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_processed_record_synthetic_columns() {
        let record = ProcessedRecord::new(RecordId::from_str("rec1").unwrap(), None);
        assert_eq!(record.get(RECORD_ID_FIELD), Some(&FieldValue::from("rec1")));
        assert_eq!(record.get(CREATED_TIME_FIELD), Some(&FieldValue::empty()));
        assert_eq!(record.created_time, "");
    }

    #[test]
    fn test_complete_schema_keeps_existing_values() {
        let mut record = ProcessedRecord::new(
            RecordId::from_str("rec1").unwrap(),
            Some("2024-01-01T00:00:00Z".to_string()),
        );
        record.insert("Name", FieldValue::from("Tea"));
        record.complete_schema(&["Name", "Description"]);

        assert_eq!(record.get("Name"), Some(&FieldValue::from("Tea")));
        assert_eq!(record.get("Description"), Some(&FieldValue::empty()));
    }

    #[test]
    fn test_field_value_labels() {
        assert_eq!(FieldValue::from("x").type_label(), "str");
        assert_eq!(FieldValue::Attachments(vec![]).type_label(), "list");
        assert!(FieldValue::Attachments(vec![]).is_empty());
        assert!(FieldValue::empty().is_empty());
    }

    #[test]
    fn test_attachments_iterator() {
        let mut record = ProcessedRecord::new(RecordId::from_str("rec1").unwrap(), None);
        record.insert(
            "Photos",
            FieldValue::Attachments(vec![AttachmentDescriptor {
                filename: "a.png".to_string(),
                original_url: "https://example.com/a.png".to_string(),
                local_path: None,
            }]),
        );
        assert_eq!(record.attachments().count(), 1);
        assert!(!record.attachments().any(AttachmentDescriptor::is_downloaded));
    }
}
