//! Status endpoint client.
//!
//! # Responsibilities
//! - Issue GET requests against remote status endpoints
//! - Decode JSON status payloads
//! - Classify failures (transport, status, decode)
//!
//! # Design Decisions
//! - One `reqwest::Client` is shared by every fetch; it is cheap to clone and
//!   safe for concurrent use
//! - Every request is bounded by the client-level timeout
//! - The body is read fully before decoding so decode errors are distinct from
//!   transport errors

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Default per-fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Error from a single status fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("malformed body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Payload served by `/streaming/serverz`.
///
/// Only `server_id` matters for health. The rest is decoded leniently.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StreamingServerz {
    pub cluster_id: String,
    pub server_id: String,
    pub version: String,
    pub go: String,
    pub state: String,
    pub now: Option<String>,
    pub start_time: Option<String>,
    pub uptime: String,
    pub clients: u64,
    pub subscriptions: u64,
    pub channels: u64,
    pub total_msgs: u64,
    pub total_bytes: u64,
}

/// HTTP client used to poll status endpoints.
#[derive(Debug, Clone)]
pub struct StatusClient {
    http: reqwest::Client,
}

impl StatusClient {
    /// Build a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("healthz-exporter/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Wrap an already configured client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// GET `url` and decode the body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Default for StatusClient {
    fn default() -> Self {
        match Self::new(DEFAULT_FETCH_TIMEOUT) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build status client, falling back to defaults");
                Self::from_client(reqwest::Client::new())
            }
        }
    }
}
