//! HTTP client for the network dataset.

use std::path::PathBuf;

use tracing::debug;

use super::error::NetworkError;
use super::snapshot::NetworkSnapshot;

/// Configuration for the dataset client.
#[derive(Debug, Clone)]
pub struct NetworkClientConfig {
    /// URL of the JSON dataset
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NetworkClientConfig {
    /// Create a new config for the given dataset URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: 60,
        }
    }

    /// Set a custom request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Client that downloads the dataset over HTTP.
#[derive(Debug, Clone)]
pub struct NetworkClient {
    http: reqwest::Client,
    url: String,
}

impl NetworkClient {
    /// Create a new dataset client.
    pub fn new(config: NetworkClientConfig) -> Result<Self, NetworkError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and parse the dataset.
    pub async fn fetch(&self) -> Result<NetworkSnapshot, NetworkError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NetworkError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!(url = %self.url, bytes = body.len(), "downloaded network dataset");

        NetworkSnapshot::from_json(&body)
    }
}

/// Where the dataset comes from.
#[derive(Debug, Clone)]
pub enum NetworkSource {
    /// A JSON file on disk
    File(PathBuf),
    /// A JSON document served over HTTP
    Url(NetworkClient),
}

impl NetworkSource {
    /// Load a fresh snapshot from this source.
    pub async fn load(&self) -> Result<NetworkSnapshot, NetworkError> {
        match self {
            NetworkSource::File(path) => {
                let json = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| NetworkError::Io {
                        path: path.clone(),
                        source,
                    })?;
                NetworkSnapshot::from_json(&json)
            }
            NetworkSource::Url(client) => client.fetch().await,
        }
    }

    /// Short description for log lines.
    pub fn describe(&self) -> String {
        match self {
            NetworkSource::File(path) => format!("file {}", path.display()),
            NetworkSource::Url(client) => format!("url {}", client.url()),
        }
    }
}
