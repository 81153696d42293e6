use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Url};
use serde::Serialize;

use super::{CleanerError, NameCleaner, DEFAULT_BATCH_SIZE, DEFAULT_TIMEOUT};

/// Connection settings for an HTTP name-cleaning service
#[derive(Debug, Clone)]
pub struct CleanerConfig {
    /// URL that accepts `POST {"names": [...]}` and answers with a JSON array of strings
    pub endpoint: String,
    /// Sent as a bearer token when present
    pub api_key: Option<String>,
    /// Upper bound on one request, including connect and body read
    pub timeout: Duration,
    /// Names per request
    pub batch_size: usize,
}

impl CleanerConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// # Errors
    ///
    /// Returns `CleanerError::Config` for a non-HTTP(S) endpoint, a zero
    /// timeout, or a zero batch size.
    pub fn validate(&self) -> Result<Url, CleanerError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| CleanerError::Config(format!("invalid endpoint '{}': {e}", self.endpoint)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CleanerError::Config(format!(
                "endpoint must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout.is_zero() {
            return Err(CleanerError::Config("timeout must be positive".to_string()));
        }
        if self.batch_size == 0 {
            return Err(CleanerError::Config("batch size must be positive".to_string()));
        }
        Ok(url)
    }
}

#[derive(Serialize)]
struct CleanRequest<'a> {
    names: &'a [String],
}

/// Cleans names through an HTTP service, bounded by the configured timeout
pub struct HttpNameCleaner {
    client: Client,
    url: Url,
    config: CleanerConfig,
    runtime: tokio::runtime::Runtime,
}

impl HttpNameCleaner {
    /// # Errors
    ///
    /// Returns `CleanerError` if the configuration is invalid or the HTTP client
    /// or runtime cannot be built.
    pub fn new(config: CleanerConfig) -> Result<Self, CleanerError> {
        let url = config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static("rpl-screen/0.1"));
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| CleanerError::Config("API key is not a valid header value".to_string()))?;
            default_headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            client,
            url,
            config,
            runtime,
        })
    }

    #[must_use]
    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    async fn request(&self, names: &[String]) -> Result<Vec<String>, CleanerError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&CleanRequest { names })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CleanerError::Malformed(format!("service answered {status}")));
        }

        let body = response.text().await?;
        serde_json::from_str::<Vec<String>>(&body)
            .map_err(|e| CleanerError::Malformed(format!("expected a JSON array of strings: {e}")))
    }
}

impl NameCleaner for HttpNameCleaner {
    fn clean(&self, names: &[String]) -> Result<Vec<String>, CleanerError> {
        tracing::debug!(count = names.len(), endpoint = %self.url, "cleaning names");
        let timeout = self.config.timeout;
        self.runtime
            .block_on(async { tokio::time::timeout(timeout, self.request(names)).await })
            .map_err(|_| CleanerError::Timeout(timeout))?
    }
}
