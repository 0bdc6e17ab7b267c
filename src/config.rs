//! Upstream connection settings.

use std::time::Duration;

/// Default UniProt REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://rest.uniprot.org";

/// Default HTTP timeout for a single search.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default delay between upstream requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Settings for the upstream UniProt client.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamConfig {
    /// Base URL of the REST API, without the `/uniprotkb/search` suffix.
    pub base_url: String,
    /// Per-request timeout enforced by the HTTP client.
    pub timeout: Duration,
    /// Delay between requests. Recorded and reported, not enforced.
    pub request_delay: Duration,
    /// Optional credential, sent as a bearer token.
    pub api_key: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            request_delay: DEFAULT_REQUEST_DELAY,
            api_key: None,
        }
    }
}

impl UpstreamConfig {
    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Search endpoint derived from the base URL.
    pub fn search_url(&self) -> String {
        format!("{}/uniprotkb/search", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UpstreamConfig::default();
        assert_eq!(config.base_url, "https://rest.uniprot.org");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.request_delay, Duration::from_secs(1));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_custom_config() {
        let config = UpstreamConfig::default()
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(60))
            .with_api_key("test_key");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.api_key.as_deref(), Some("test_key"));
    }

    #[test]
    fn test_search_url_tolerates_trailing_slash() {
        let config = UpstreamConfig::default().with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.search_url(), "http://127.0.0.1:9000/uniprotkb/search");
        assert_eq!(
            UpstreamConfig::default().search_url(),
            "https://rest.uniprot.org/uniprotkb/search"
        );
    }
}
