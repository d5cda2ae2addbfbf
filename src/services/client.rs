// src/services/client.rs
use crate::config::DashboardConfig;
use crate::services::error::ApiError;
use log::{debug, error, info};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// HTTP collaborator shared by the quota and treasury APIs.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::config_error(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(http, &config.api_base_url))
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends each segment to the base URL, percent-encoding reserved characters.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ApiError::config_error(format!("Invalid API base URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::config_error(format!("API base URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get_json<T>(&self, segments: &[&str], query: &[(&str, String)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(segments)?;
        info!("GET {} {:?}", url, query);

        let response = self.http.get(url.clone()).query(query).send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("{} returned {}: {}", url, status, body);
            return Err(ApiError::status_error(
                status.as_u16(),
                format!("{} returned {}", url, status),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            debug!("Undecodable body from {}: {}", url, body);
            ApiError::decode_error(format!("Failed to decode response from {}: {}", url, e))
        })
    }
}
