//! Airtable REST API wire models

use crate::domain::{RawRecord, TableDescriptor, TableId};
use serde::{Deserialize, Serialize};

/// Response of `GET /meta/bases/{base_id}/tables`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesResponse {
    #[serde(default)]
    pub tables: Vec<TableSchema>,
}

/// One table in the metadata response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    pub id: TableId,

    pub name: String,

    #[serde(rename = "primaryFieldId", default, skip_serializing_if = "Option::is_none")]
    pub primary_field_id: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

/// One field in a table schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
}

impl From<TableSchema> for TableDescriptor {
    fn from(schema: TableSchema) -> Self {
        TableDescriptor::new(
            schema.name,
            schema.id,
            schema.fields.into_iter().map(|field| field.name).collect(),
        )
    }
}

/// One page of `GET /{base_id}/{table}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPage {
    #[serde(default)]
    pub records: Vec<RawRecord>,

    /// Cursor for the next page; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_response_into_descriptors() {
        let json = r#"{
            "tables": [{
                "id": "tblProducts",
                "name": "Products",
                "primaryFieldId": "fld1",
                "fields": [
                    {"id": "fld1", "name": "Name", "type": "singleLineText"},
                    {"id": "fld2", "name": "Price", "type": "currency"}
                ],
                "views": []
            }]
        }"#;

        let response: TablesResponse = serde_json::from_str(json).unwrap();
        let descriptors: Vec<TableDescriptor> =
            response.tables.into_iter().map(Into::into).collect();

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "Products");
        assert_eq!(descriptors[0].id.as_str(), "tblProducts");
        assert_eq!(descriptors[0].fields, vec!["Name", "Price"]);
    }

    #[test]
    fn test_record_page_offset() {
        let page: RecordPage =
            serde_json::from_str(r#"{"records": [], "offset": "itr1/rec2"}"#).unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.offset.as_deref(), Some("itr1/rec2"));

        let last: RecordPage = serde_json::from_str(r#"{"records": []}"#).unwrap();
        assert!(last.offset.is_none());
    }
}
