use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT,
};
use reqwest::Client;
use serde_json::Value;

use crate::core::config::UpstreamConfig;
use crate::core::ApiError;

pub const STORE_ENDPOINT: &str = "store listing";
pub const CAPACITY_ENDPOINT: &str = "capacity listing";

const STORE_PATH: &str = "/v2/compute/droplet/market/stores";
const CAPACITY_PATH: &str = "/v2/compute/instances/capacity";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";
const CONSOLE_ORIGIN: &str = "https://next.duckyci.com";
const CONSOLE_REFERER: &str = "https://next.duckyci.com/";

/// Read-only view of the upstream commerce API. Both calls return the decoded
/// JSON body of a successful response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketApi: Send + Sync {
    async fn store_listing(&self) -> Result<Value, ApiError>;
    async fn capacity_listing(&self) -> Result<Value, ApiError>;
}

/// HTTP client for the DuckyCI API. One connection pool shared by all checkers.
pub struct DuckyClient {
    client: Client,
    base_url: String,
}

impl DuckyClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ApiError> {
        // Accept-Encoding is left to reqwest so bodies are decompressed transparently.
        let client = Client::builder()
            .default_headers(Self::default_headers(config)?)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Build)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn default_headers(config: &UpstreamConfig) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ORIGIN, HeaderValue::from_static(CONSOLE_ORIGIN));
        headers.insert(REFERER, HeaderValue::from_static(CONSOLE_REFERER));

        if let Some(token) = &config.authorization_token {
            let mut value = HeaderValue::from_str(token).map_err(|_| ApiError::InvalidHeader {
                header: "authorization",
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    async fn get_json(&self, endpoint: &'static str, path: &str) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })
    }
}

#[async_trait]
impl MarketApi for DuckyClient {
    async fn store_listing(&self) -> Result<Value, ApiError> {
        self.get_json(STORE_ENDPOINT, STORE_PATH).await
    }

    async fn capacity_listing(&self) -> Result<Value, ApiError> {
        self.get_json(CAPACITY_ENDPOINT, CAPACITY_PATH).await
    }
}
