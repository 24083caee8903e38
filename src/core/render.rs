//! Markdown rendering
//!
//! One document per table plus `summary.md`. Documents are rebuilt from
//! scratch on every run; apart from the `Generated on:` line, identical data
//! always renders to identical text.

use crate::domain::{AttachmentDescriptor, FieldValue, ProcessedRecord, Result};
use chrono::Local;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// File name of the cross-table summary
pub const SUMMARY_FILE: &str = "summary.md";

const MAX_CELL_CHARS: usize = 100;
const TRUNCATED_CHARS: usize = 97;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// All processed records of one table
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedTable {
    pub name: String,
    pub records: Vec<ProcessedRecord>,
}

impl ExportedTable {
    pub fn new(name: impl Into<String>, records: Vec<ProcessedRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

/// Current local time in the document timestamp format
pub fn generation_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Escape table delimiters and line breaks, then truncate long values
pub fn escape_cell(value: &str) -> String {
    let escaped = value
        .replace("\r\n", "\n")
        .replace('|', "\\|")
        .replace('\n', "<br>");

    if escaped.chars().count() > MAX_CELL_CHARS {
        let mut truncated: String = escaped.chars().take(TRUNCATED_CHARS).collect();
        truncated.push_str("...");
        truncated
    } else {
        escaped
    }
}

/// Printable text of a cell before escaping
pub fn cell_text(value: Option<&FieldValue>, output_dir: &Path) -> String {
    match value {
        None => String::new(),
        Some(FieldValue::Text(text)) => text.clone(),
        Some(FieldValue::Attachments(attachments)) => attachments
            .iter()
            .map(|attachment| attachment_link(attachment, output_dir))
            .collect::<Vec<_>>()
            .join("<br>"),
    }
}

fn attachment_link(attachment: &AttachmentDescriptor, output_dir: &Path) -> String {
    match &attachment.local_path {
        Some(path) => format!(
            "[{}]({})",
            link_label(&attachment.filename),
            link_target(path, output_dir)
        ),
        None => attachment.filename.clone(),
    }
}

fn link_label(filename: &str) -> String {
    filename.replace('[', "\\[").replace(']', "\\]")
}

/// Path of a downloaded file relative to the output directory
///
/// Segments are percent-encoded and joined with `/`. Parentheses are encoded
/// too so they cannot close the Markdown link early.
fn link_target(path: &Path, output_dir: &Path) -> String {
    let relative = path.strip_prefix(output_dir).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let Ok(mut target) = Url::parse("file:///") else {
        return parts.join("/");
    };
    if let Ok(mut segments) = target.path_segments_mut() {
        segments.clear().extend(&parts);
    }

    target
        .path()
        .trim_start_matches('/')
        .replace('(', "%28")
        .replace(')', "%29")
}

/// Render the document for one table
///
/// # Errors
///
/// Returns a render error if formatting fails.
pub fn render_table_document(
    table: &ExportedTable,
    generated_at: &str,
    output_dir: &Path,
) -> Result<String> {
    let mut doc = String::new();

    writeln!(doc, "# {}\n", table.name)?;
    writeln!(doc, "Generated on: {generated_at}")?;
    writeln!(doc, "Total Records: {}\n", table.records.len())?;

    if table.records.is_empty() {
        writeln!(doc, "No data available for this table.")?;
        return Ok(doc);
    }

    let columns: BTreeSet<&str> = table
        .records
        .iter()
        .flat_map(|record| record.fields.keys().map(String::as_str))
        .collect();

    let header: Vec<String> = columns.iter().map(|c| escape_cell(c)).collect();
    writeln!(doc, "| {} |", header.join(" | "))?;
    writeln!(doc, "| {} |", vec!["---"; columns.len()].join(" | "))?;

    for record in &table.records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| escape_cell(&cell_text(record.get(column), output_dir)))
            .collect();
        writeln!(doc, "| {} |", row.join(" | "))?;
    }

    Ok(doc)
}

/// Field names of a table with the type of the last non-empty value seen
pub fn field_types(records: &[ProcessedRecord]) -> BTreeMap<&str, &'static str> {
    let mut types = BTreeMap::new();

    for record in records {
        for (field, value) in &record.fields {
            let entry = types.entry(field.as_str()).or_insert("unknown");
            if !value.is_empty() {
                *entry = value.type_label();
            }
        }
    }

    types
}

/// Render the cross-table summary document
///
/// # Errors
///
/// Returns a render error if formatting fails.
pub fn render_summary(tables: &[ExportedTable], generated_at: &str) -> Result<String> {
    let total_records: usize = tables.iter().map(|t| t.records.len()).sum();
    let mut doc = String::new();

    writeln!(doc, "# Airtable Database Summary\n")?;
    writeln!(doc, "Generated on: {generated_at}\n")?;

    writeln!(doc, "## Overview")?;
    writeln!(doc, "- Total Tables: {}", tables.len())?;
    writeln!(doc, "- Total Records: {total_records}\n")?;

    writeln!(doc, "## Table Details\n")?;
    for table in tables {
        writeln!(doc, "### {}", table.name)?;
        writeln!(doc, "- Records: {}", table.records.len())?;

        if !table.records.is_empty() {
            writeln!(doc, "#### Fields:")?;
            for (field, type_label) in field_types(&table.records) {
                writeln!(doc, "- {field} ({type_label})")?;
            }
        }

        writeln!(doc)?;
    }

    Ok(doc)
}

/// Writes rendered documents into the output directory
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    output_dir: PathBuf,
}

impl MarkdownRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `<table name>.md`, replacing any previous document
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or the file write fails.
    pub async fn write_table(&self, table: &ExportedTable) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(crate::domain::table::document_file_name(&table.name));
        let doc = render_table_document(table, &generation_timestamp(), &self.output_dir)?;
        tokio::fs::write(&path, doc).await?;

        crate::log_table_complete!(table.name, table.records.len(), path);
        Ok(path)
    }

    /// Write `summary.md`
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or the file write fails.
    pub async fn write_summary(&self, tables: &[ExportedTable]) -> Result<PathBuf> {
        let path = self.output_dir.join(SUMMARY_FILE);
        let doc = render_summary(tables, &generation_timestamp())?;
        tokio::fs::write(&path, doc).await?;

        tracing::info!(path = %path.display(), tables = tables.len(), "Summary written");
        Ok(path)
    }
}
