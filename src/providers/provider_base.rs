use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;

use super::{CatalogError, CatalogResult};
use crate::config::CatalogConfig;

/// Source of raw page markup. The catalog reaches the network only through this trait.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Download a page and return its body as text
    async fn fetch_page(&self, url: &str) -> CatalogResult<String>;
}

/// Base provider struct backed by a reqwest client
pub struct BaseProvider {
    pub class_id: String,
    pub client: Client,
    pub headers: HashMap<String, String>,
}

impl BaseProvider {
    /// Create a new base provider
    pub fn new(class_id: String, headers: HashMap<String, String>, timeout: Duration) -> Self {
        let mut default_headers = reqwest::header::HeaderMap::new();
        for (key, value) in &headers {
            if let (Ok(name), Ok(val)) = (
                reqwest::header::HeaderName::from_bytes(key.as_bytes()),
                reqwest::header::HeaderValue::from_str(value),
            ) {
                default_headers.insert(name, val);
            }
        }

        let client = Client::builder()
            .default_headers(default_headers)
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            class_id,
            client,
            headers,
        }
    }

    /// Create a provider using the user agent and timeout from a config
    pub fn from_config(config: &CatalogConfig) -> Self {
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), config.user_agent.clone());
        Self::new(
            "limitless_pocket".to_string(),
            headers,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Make an HTTP GET request
    pub async fn get_request(&self, url: &str) -> CatalogResult<Response> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::NetworkError(format!("Request failed: {}", e)))
    }

    /// Download text content, failing on any non-success status
    pub async fn download_text(&self, url: &str) -> CatalogResult<String> {
        let response = self.get_request(url).await?;
        self.log_download(&response);

        if !response.status().is_success() {
            return Err(CatalogError::NetworkError(format!(
                "HTTP error {} for {}",
                response.status(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| CatalogError::NetworkError(format!("Text download error: {}", e)))
    }

    fn log_download(&self, response: &Response) {
        debug!(
            "[{}] Downloaded {} (Status: {})",
            self.class_id,
            response.url(),
            response.status()
        );
    }
}

#[async_trait]
impl PageFetcher for BaseProvider {
    async fn fetch_page(&self, url: &str) -> CatalogResult<String> {
        self.download_text(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_sets_user_agent() {
        let config = CatalogConfig::default();
        let provider = BaseProvider::from_config(&config);

        assert_eq!(provider.class_id, "limitless_pocket");
        assert_eq!(provider.headers.get("User-Agent"), Some(&config.user_agent));
    }

    #[test]
    fn test_invalid_header_is_skipped() {
        let mut headers = HashMap::new();
        headers.insert("Bad Header\n".to_string(), "x".to_string());

        let provider = BaseProvider::new("test".to_string(), headers, Duration::from_secs(5));
        assert_eq!(provider.headers.len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let provider = BaseProvider::new("test".to_string(), HashMap::new(), Duration::from_secs(2));
        let result = provider.fetch_page("http://127.0.0.1:9/cards").await;

        assert!(matches!(result, Err(CatalogError::NetworkError(_))));
    }
}
