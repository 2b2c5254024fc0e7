use crate::discussions::DiscussionBackend;
use crate::prelude::*;
use kaggletools_core::discussions::types::ListEntitiesResponse;
use kaggletools_core::discussions::{DiscussionError, RemoteDocument, RemoteRequest};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default Kaggle API base URL
pub const DEFAULT_API_BASE: &str = "https://www.kaggle.com/api/v1";

const SEARCH_PATH: &str = "search.SearchApiService/ListEntities";

/// Kaggle configuration from environment variables or `kaggle.json`
#[derive(Debug, Clone)]
pub struct KaggleConfig {
    pub api_base: String,
    pub username: String,
    pub key: String,
}

#[derive(Debug, Deserialize)]
struct KaggleCredentials {
    username: String,
    key: String,
}

impl KaggleConfig {
    /// Load configuration
    ///
    /// Uses KAGGLE_USERNAME and KAGGLE_KEY when both are set, otherwise reads
    /// `$KAGGLE_CONFIG_DIR/kaggle.json` (default `~/.kaggle/kaggle.json`).
    /// KAGGLE_API_BASE overrides the API base URL.
    pub fn from_env() -> Result<Self> {
        let api_base =
            std::env::var("KAGGLE_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        if let (Ok(username), Ok(key)) = (
            std::env::var("KAGGLE_USERNAME"),
            std::env::var("KAGGLE_KEY"),
        ) {
            return Ok(Self {
                api_base,
                username,
                key,
            });
        }

        let path = credentials_path()?;
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::MissingCredentials(format!(
                "set KAGGLE_USERNAME and KAGGLE_KEY or create {} ({e})",
                path.display()
            ))
        })?;
        let credentials = parse_credentials(&content)?;

        Ok(Self {
            api_base,
            username: credentials.username,
            key: credentials.key,
        })
    }
}

fn credentials_path() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("KAGGLE_CONFIG_DIR") {
        return Ok(PathBuf::from(dir).join("kaggle.json"));
    }
    dirs_next::home_dir()
        .map(|home| home.join(".kaggle").join("kaggle.json"))
        .ok_or_eyre("Could not determine home directory")
}

fn parse_credentials(content: &str) -> Result<KaggleCredentials> {
    serde_json::from_str(content)
        .map_err(|e| Error::MissingCredentials(format!("invalid kaggle.json: {e}")).into())
}

/// Create an authenticated HTTP client with Basic Auth headers
pub fn create_authenticated_client(config: &KaggleConfig) -> Result<reqwest::Client> {
    use base64::Engine;
    use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

    let auth_string = format!("{}:{}", config.username, config.key);
    let auth_encoded = base64::engine::general_purpose::STANDARD.encode(&auth_string);

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Basic {auth_encoded}"))
            .map_err(|e| eyre!("Invalid header value: {}", e))?,
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| Error::Network(format!("Failed to build HTTP client: {e}")).into())
}

/// Kaggle search service client
///
/// Constructed once per process and shared by every tool invocation.
pub struct KaggleClient {
    http: reqwest::Client,
    api_base: String,
}

impl KaggleClient {
    pub fn new(config: &KaggleConfig) -> Result<Self> {
        Ok(Self {
            http: create_authenticated_client(config)?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&KaggleConfig::from_env()?)
    }
}

#[async_trait::async_trait]
impl DiscussionBackend for KaggleClient {
    async fn search(&self, request: &RemoteRequest) -> Result<Vec<RemoteDocument>, DiscussionError> {
        let url = format!("{}/{SEARCH_PATH}", self.api_base);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                DiscussionError::RemoteCallFailed(format!("Failed to send request to Kaggle: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DiscussionError::RemoteCallFailed(format!(
                "Kaggle API error [{status}]: {body}"
            )));
        }

        let body: ListEntitiesResponse = response.json().await.map_err(|e| {
            DiscussionError::RemoteCallFailed(format!("Failed to parse Kaggle response: {e}"))
        })?;

        Ok(body.documents)
    }

    async fn fetch_page(&self, url: &str) -> Result<String, DiscussionError> {
        let response = self.http.get(url).send().await.map_err(|e| {
            DiscussionError::RemoteCallFailed(format!("Failed to fetch {url}: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(DiscussionError::RemoteCallFailed(format!(
                "Failed to fetch {url}: HTTP {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| DiscussionError::RemoteCallFailed(format!("Failed to read {url}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_credentials() {
        let creds = parse_credentials(r#"{"username": "kaggler", "key": "abc123"}"#).unwrap();
        assert_eq!(creds.username, "kaggler");
        assert_eq!(creds.key, "abc123");
    }

    #[test]
    fn test_parse_credentials_invalid() {
        let err = parse_credentials(r#"{"username": "kaggler"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid kaggle.json"));
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let config = KaggleConfig {
            api_base: "https://example.com/api/v1/".to_string(),
            username: "u".to_string(),
            key: "k".to_string(),
        };
        let client = KaggleClient::new(&config).unwrap();
        assert_eq!(client.api_base, "https://example.com/api/v1");
    }
}
