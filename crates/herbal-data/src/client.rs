//! JSON API client.

use herbal_core::StoreConfig;
use serde::de::DeserializeOwned;

use crate::transport::Transport;

/// Error type for fetch operations.
///
/// Both network and parse failures end up here; sections surface them as
/// an error flag and render nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl FetchError {
    /// Short kind label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http { .. } | Self::Connection(_) => "network",
            Self::Deserialization(_) => "parse",
        }
    }
}

/// Client for the storefront's read-only API.
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    /// Create a client for a base URL. An empty base means same origin.
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    /// Create a client from the storefront configuration.
    pub fn from_config(config: &StoreConfig, transport: T) -> Self {
        Self::new(config.backend_url.clone(), transport)
    }

    /// Full URL for an API path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Fetch an API path (with query string) and decode its JSON body.
    pub async fn fetch_path<D: DeserializeOwned>(&self, path: &str) -> Result<D, FetchError> {
        let url = self.url_for(path);
        tracing::debug!(url = %url, "GET");

        let bytes = self.transport.get(&url).await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Deserialization(e.to_string()))
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::Endpoint;
    use crate::transport::MockTransport;

    #[test]
    fn test_url_for() {
        let same_origin = ApiClient::new("", MockTransport::new());
        assert_eq!(same_origin.url_for("/api/offers"), "/api/offers");

        let remote = ApiClient::new("https://api.example.com/", MockTransport::new());
        assert_eq!(
            remote.url_for("/api/offers"),
            "https://api.example.com/api/offers"
        );
    }

    #[test]
    fn test_from_config() {
        let config = StoreConfig {
            backend_url: "https://api.example.com".to_string(),
            ..Default::default()
        };
        let client = ApiClient::from_config(&config, MockTransport::new());
        assert_eq!(
            client.url_for("/api/banners"),
            "https://api.example.com/api/banners"
        );
    }

    #[tokio::test]
    async fn test_fetch_decodes_json() {
        let transport = MockTransport::new().with_json("/api/offers", r#"[{"title": "Free delivery"}]"#);
        let client = ApiClient::new("", transport);

        let offers: Vec<serde_json::Value> = client.fetch_path(&Endpoint::Offers.path()).await.unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(client.transport().requests(), vec!["/api/offers"]);
    }

    #[tokio::test]
    async fn test_fetch_parse_failure() {
        let transport = MockTransport::new().with_json("/api/offers", "<html>oops</html>");
        let client = ApiClient::new("", transport);

        let err = client
            .fetch_path::<Vec<serde_json::Value>>(&Endpoint::Offers.path())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Deserialization(_)));
        assert_eq!(err.kind(), "parse");
    }

    #[tokio::test]
    async fn test_fetch_network_failure() {
        let client = ApiClient::new("", MockTransport::new());
        let err = client
            .fetch_path::<Vec<serde_json::Value>>(&Endpoint::Banners.path())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "network");
    }
}
