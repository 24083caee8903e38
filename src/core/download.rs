//! Attachment downloads
//!
//! Files land in `<output>/attachments/<record-id>/<filename>`. A download
//! that keeps failing is logged and reported as `None`; it never aborts the
//! record it belongs to.

use crate::adapters::airtable::AirtableApi;
use crate::core::normalize::AttachmentRef;
use crate::core::retry::RetryPolicy;
use crate::domain::{AttachmentDescriptor, RecordId};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the attachments directory under the output directory
pub const ATTACHMENTS_DIR: &str = "attachments";

/// Downloads attachment files with bounded retries
pub struct AttachmentDownloader {
    api: Arc<dyn AirtableApi>,
    root: PathBuf,
    policy: RetryPolicy,
}

impl AttachmentDownloader {
    /// Create a downloader writing under `<output_dir>/attachments`
    pub fn new(api: Arc<dyn AirtableApi>, output_dir: &Path, policy: RetryPolicy) -> Self {
        Self {
            api,
            root: output_dir.join(ATTACHMENTS_DIR),
            policy,
        }
    }

    /// Directory holding one record's attachments
    pub fn record_dir(&self, record_id: &RecordId) -> PathBuf {
        self.root.join(record_id.as_str())
    }

    /// Download one attachment, returning its local path on success
    pub async fn download(&self, record_id: &RecordId, attachment: &AttachmentRef) -> Option<PathBuf> {
        let folder = self.record_dir(record_id);
        if let Err(e) = tokio::fs::create_dir_all(&folder).await {
            tracing::error!(
                path = %folder.display(),
                error = %e,
                "Failed to create attachment directory"
            );
            return None;
        }

        let filename = sanitize_filename(&attachment.filename);
        let destination = folder.join(&filename);

        let result = self
            .policy
            .run(&filename, || self.api.download(&attachment.url, &destination))
            .await;

        match result {
            Ok(bytes) => {
                tracing::debug!(
                    record_id = %record_id,
                    path = %destination.display(),
                    bytes = bytes,
                    "Downloaded attachment"
                );
                Some(destination)
            }
            Err(e) => {
                tracing::error!(
                    record_id = %record_id,
                    attempts = self.policy.max_attempts(),
                    "Failed to download attachment {}: {}",
                    filename,
                    e
                );
                None
            }
        }
    }

    /// Download every attachment of a cell, keeping failed ones without a path
    pub async fn download_all(
        &self,
        record_id: &RecordId,
        attachments: &[AttachmentRef],
    ) -> Vec<AttachmentDescriptor> {
        let mut descriptors = Vec::with_capacity(attachments.len());

        for attachment in attachments {
            let local_path = self.download(record_id, attachment).await;
            descriptors.push(AttachmentDescriptor {
                filename: attachment.filename.clone(),
                original_url: attachment.url.clone(),
                local_path,
            });
        }

        descriptors
    }
}

/// Make a remote filename safe to use inside the record directory
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "unknown".to_string(),
        _ => cleaned,
    }
}
