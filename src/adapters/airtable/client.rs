//! Airtable REST client
//!
//! Implements [`AirtableApi`] over `reqwest`. Requests to the Airtable API
//! carry the access token as a bearer header; attachment downloads do not,
//! since attachment URLs are pre-signed and may point at other hosts.

use super::api::AirtableApi;
use super::models::{RecordPage, TablesResponse};
use crate::config::AirtableConfig;
use crate::config::SecretString;
use crate::domain::{AirtableError, ExportError, RawRecord, Result, TableDescriptor};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};
use url::Url;

/// Airtable API client
///
/// # Example
///
/// ```no_run
/// use airtable_export::adapters::airtable::{AirtableApi, AirtableClient};
/// use airtable_export::config::load_config;
///
/// # async fn example() -> airtable_export::domain::Result<()> {
/// let config = load_config(None)?;
/// let client = AirtableClient::new(&config.airtable, config.export.download_chunk_bytes)?;
///
/// for table in client.list_tables().await? {
///     println!("{} ({} fields)", table.name, table.fields.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct AirtableClient {
    client: Client,
    api_url: Url,
    base_id: String,
    api_key: SecretString,
    page_size: u32,
    chunk_bytes: usize,
}

impl AirtableClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key is missing, the API URL
    /// is invalid, or the HTTP client cannot be built.
    pub fn new(config: &AirtableConfig, chunk_bytes: usize) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            ExportError::Configuration(
                "AIRTABLE_API_KEY not found in environment variables".to_string(),
            )
        })?;

        let api_url = Url::parse(&config.api_url).map_err(|e| {
            ExportError::Configuration(format!("Invalid API URL '{}': {e}", config.api_url))
        })?;

        let client = ClientBuilder::new()
            .build()
            .map_err(|e| {
                ExportError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            api_url,
            base_id: config.base_id.clone(),
            api_key,
            page_size: config.page_size,
            chunk_bytes: chunk_bytes.max(1),
        })
    }

    /// Build `{api_url}/{segments...}` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ExportError::Configuration(format!(
                    "API URL cannot be used as a base: {}",
                    self.api_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.api_key.expose_secret().as_str())
    }

    /// Send a request and decode a JSON body, mapping failures to [`AirtableError`]
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AirtableError::from_status(status.as_u16(), body).into());
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AirtableError::InvalidResponse(e.to_string()).into())
    }

    async fn write_response(&self, url: &str, destination: &Path) -> Result<u64> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AirtableError::DownloadFailed(format!(
                "{url} returned status {status}"
            ))
            .into());
        }

        let file = tokio::fs::File::create(destination).await?;
        let mut writer = BufWriter::with_capacity(self.chunk_bytes, file);
        let mut written: u64 = 0;

        while let Some(chunk) = response.chunk().await.map_err(map_transport_error)? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;

        Ok(written)
    }
}

#[async_trait]
impl AirtableApi for AirtableClient {
    async fn list_tables(&self) -> Result<Vec<TableDescriptor>> {
        let url = self.endpoint(&["meta", "bases", self.base_id.as_str(), "tables"])?;

        tracing::debug!(url = %url, "Fetching table metadata");

        let response: TablesResponse = self
            .send_json(self.authorized(self.client.get(url)))
            .await?;

        Ok(response.tables.into_iter().map(Into::into).collect())
    }

    async fn list_records(&self, table: &TableDescriptor) -> Result<Vec<RawRecord>> {
        let url = self.endpoint(&[self.base_id.as_str(), table.id.as_str()])?;
        let page_size = self.page_size.to_string();

        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut request = self
                .authorized(self.client.get(url.clone()))
                .query(&[("pageSize", page_size.as_str())]);
            if let Some(ref cursor) = offset {
                request = request.query(&[("offset", cursor.as_str())]);
            }

            let page: RecordPage = self.send_json(request).await?;
            pages += 1;
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        tracing::debug!(
            table = %table.name,
            pages = pages,
            records = records.len(),
            "Fetched all record pages"
        );

        Ok(records)
    }

    async fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        match self.write_response(url, destination).await {
            Ok(written) => Ok(written),
            Err(e) => {
                if let Err(remove_err) = tokio::fs::remove_file(destination).await {
                    if remove_err.kind() != std::io::ErrorKind::NotFound {
                        tracing::debug!(
                            path = %destination.display(),
                            error = %remove_err,
                            "Could not remove partial download"
                        );
                    }
                }
                Err(e)
            }
        }
    }

    fn base_id(&self) -> &str {
        &self.base_id
    }
}

fn map_transport_error(err: reqwest::Error) -> ExportError {
    AirtableError::ConnectionFailed(err.to_string()).into()
}
