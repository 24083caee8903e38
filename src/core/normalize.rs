//! Field value normalization
//!
//! Turns a raw Airtable cell value into something printable. The rules are
//! checked in a fixed order and the first one that matches wins:
//!
//! 1. null becomes the empty string
//! 2. a field named `status` becomes the lowercased value
//! 3. a date-like field holding an ISO-8601 string becomes `YYYY-MM-DD HH:MM:SS`
//! 4. numbers become their decimal text, booleans `True` or `False`
//! 5. a list whose first element is an object with a `url` key is an
//!    attachment collection
//! 6. other lists and objects become JSON with `, ` and `: ` separators
//! 7. anything else becomes its plain text
//!
//! Classification is pure. Downloading the attachments found by rule 5 is
//! left to the caller.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io;

const DATE_MARKERS: [&str; 4] = ["date", "time", "created", "modified"];
const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%d %H:%M%#z"];

/// Attachment found in a cell, before download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    pub filename: String,
    pub url: String,
}

/// Result of classifying a raw value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Text(String),
    Attachments(Vec<AttachmentRef>),
}

impl Normalized {
    fn text(value: impl Into<String>) -> Self {
        Normalized::Text(value.into())
    }
}

/// Classify a raw field value
pub fn classify(value: &Value, field_name: &str) -> Normalized {
    if value.is_null() {
        return Normalized::text("");
    }

    let lowered_name = field_name.to_lowercase();

    if lowered_name == "status" {
        return Normalized::Text(plain_text(value).to_lowercase());
    }

    if is_date_field(&lowered_name) {
        if let Some(formatted) = value.as_str().and_then(format_timestamp) {
            return Normalized::Text(formatted);
        }
    }

    match value {
        Value::Number(n) => Normalized::Text(n.to_string()),
        Value::Bool(true) => Normalized::text("True"),
        Value::Bool(false) => Normalized::text("False"),
        Value::Array(items) if is_attachment_list(items) => {
            Normalized::Attachments(items.iter().filter_map(attachment_ref).collect())
        }
        Value::Array(_) | Value::Object(_) => Normalized::Text(spaced_json(value)),
        _ => Normalized::Text(plain_text(value)),
    }
}

/// Whether a lowercased field name looks like it holds a date
pub fn is_date_field(lowered_name: &str) -> bool {
    DATE_MARKERS
        .iter()
        .any(|marker| lowered_name.contains(marker))
}

/// Reformat an ISO-8601 timestamp as `YYYY-MM-DD HH:MM:SS`
///
/// Offset-carrying values (including a trailing `Z`) keep their own offset.
/// Date-only values are taken as midnight. Returns `None` when the text is
/// not a timestamp.
pub fn format_timestamp(text: &str) -> Option<String> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.format(DATE_OUTPUT_FORMAT).to_string());
    }

    let with_offset = text.replace('Z', "+00:00");
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&with_offset, format) {
            return Some(parsed.format(DATE_OUTPUT_FORMAT).to_string());
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.format(DATE_OUTPUT_FORMAT).to_string());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.format(DATE_OUTPUT_FORMAT).to_string())
}

fn is_attachment_list(items: &[Value]) -> bool {
    items
        .first()
        .and_then(Value::as_object)
        .is_some_and(|first| first.contains_key("url"))
}

fn attachment_ref(item: &Value) -> Option<AttachmentRef> {
    let object = item.as_object()?;
    let url = object.get("url")?.as_str()?;
    let filename = object
        .get("filename")
        .and_then(Value::as_str)
        .unwrap_or("unknown");

    Some(AttachmentRef {
        filename: filename.to_string(),
        url: url.to_string(),
    })
}

/// JSON separators `, ` and `: `, non-ASCII left unescaped
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

fn spaced_json(value: &Value) -> String {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buffer).unwrap_or_else(|_| value.to_string())
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
