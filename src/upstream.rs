//! Upstream UniProt client.
//!
//! One GET per lookup against `<base_url>/uniprotkb/search`, restricted to
//! human entries. The client returns the raw search document; interpreting it
//! is the job of [`crate::annotation`].

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value as JsonValue;

use crate::config::UpstreamConfig;

/// NCBI taxonomy id for Homo sapiens.
pub const HUMAN_TAXON_ID: u32 = 9606;

/// Failure talking to the upstream API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Network, timeout, TLS, or body decoding failure.
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream returned HTTP {0}")]
    Status(StatusCode),
}

/// A source of UniProt search documents.
#[async_trait]
pub trait GeneSource: Send + Sync {
    /// Search for human entries matching a gene symbol.
    async fn search(&self, gene_symbol: &str) -> Result<JsonValue, UpstreamError>;
}

/// Search query for a gene symbol, restricted to human entries.
pub fn search_query(gene_symbol: &str) -> String {
    format!("gene:{} AND organism_id:{}", gene_symbol, HUMAN_TAXON_ID)
}

/// HTTP client for the UniProt REST API.
///
/// Holds a single `reqwest::Client`, so connections are pooled across lookups.
pub struct UniprotClient {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl UniprotClient {
    /// Build a client from the given settings.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// The settings this client was built with.
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }
}

#[async_trait]
impl GeneSource for UniprotClient {
    async fn search(&self, gene_symbol: &str) -> Result<JsonValue, UpstreamError> {
        let url = self.config.search_url();
        let query = search_query(gene_symbol);
        tracing::debug!(%url, %query, "querying upstream");

        let mut request = self
            .client
            .get(&url)
            .query(&[("query", query.as_str()), ("format", "json")]);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        Ok(response.json::<JsonValue>().await?)
    }
}
