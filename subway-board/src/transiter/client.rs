//! Transiter HTTP client.
//!
//! Provides async methods for querying route metadata and stop boards from
//! a Transiter instance. Each call is a single attempt: no retries.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::trace;

use crate::domain::StopId;

use super::error::UpstreamError;
use super::types::{RouteResponse, StopResponse};

/// Default Transiter instance.
const DEFAULT_BASE_URL: &str = "https://demo.transiter.dev";

/// Default transit system namespace.
const DEFAULT_SYSTEM: &str = "us-ny-subway";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the Transiter client.
#[derive(Debug, Clone)]
pub struct TransiterConfig {
    /// Base URL of the Transiter instance
    pub base_url: String,
    /// Transit system id
    pub system: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransiterConfig {
    /// Create a config pointing at the public demo instance.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            system: DEFAULT_SYSTEM.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the transit system id.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TransiterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Transiter API client.
///
/// Uses a semaphore to limit concurrent requests so that one busy board
/// cannot flood the upstream.
#[derive(Debug, Clone)]
pub struct TransiterClient {
    http: reqwest::Client,
    system_url: String,
    semaphore: Arc<Semaphore>,
}

impl TransiterClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TransiterConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            system_url: format!("{}/systems/{}", config.base_url, config.system),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Get route metadata by service code.
    pub async fn get_route(&self, code: &str) -> Result<RouteResponse, UpstreamError> {
        self.get_json(&format!("routes/{code}")).await
    }

    /// Get a stop's board: stop times, transfers and route statistics.
    ///
    /// A realtime stop id is queried with its `/realtime` suffix.
    pub async fn get_stop(&self, stop: &StopId) -> Result<StopResponse, UpstreamError> {
        self.get_json(&format!("stops/{}", stop.query_path())).await
    }

    /// Issue one GET below the system URL and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| UpstreamError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.system_url, path);
        trace!(%url, "upstream request");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| UpstreamError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// The system URL requests are issued against.
    pub fn system_url(&self) -> &str {
        &self.system_url
    }
}
