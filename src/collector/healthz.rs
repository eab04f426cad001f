//! Server health-state collector.
//!
//! # Responsibilities
//! - Hold the fixed list of monitored servers
//! - Describe the `<namespace>_<endpoint>_state` gauge
//! - Probe every server per scrape and report 1 (up) or 0 (down)
//!
//! # Health Policy
//! ```text
//! fetch failed (transport, status, decode)  → Down
//! fetch ok, server_id empty                  → Down
//! fetch ok, server_id present                → Up
//! ```
//!
//! # Design Decisions
//! - Label values come from configuration, never from the remote payload
//! - Fetches fan out concurrently and are joined in registry order
//! - No state survives a scrape, so no locking is needed

use std::str::FromStr;

use futures_util::future::{join_all, BoxFuture};
use serde::{Deserialize, Serialize};

use crate::collector::status::{StatusClient, StreamingServerz};
use crate::collector::{build_fq_name, Collector, MetricDesc, MetricSample, CORE_SYSTEM};

/// Path appended to each server's base URL.
pub const SERVERZ_PATH: &str = "/streaming/serverz";

/// Label carrying the registered server id.
pub const SERVER_ID_LABEL: &str = "server_id";

/// Returns true if `system`/`endpoint` names the healthz collector.
pub fn is_healthz_endpoint(system: &str, endpoint: &str) -> bool {
    system == CORE_SYSTEM && endpoint == "healthz"
}

/// Caller-supplied server descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSource {
    pub id: String,
    /// Base URL of the server's monitoring port (e.g. "http://127.0.0.1:8222").
    pub url: String,
}

impl ServerSource {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// Error parsing a `ServerSource` from the command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseServerError {
    #[error("server must not be empty")]
    Empty,

    #[error("expected id=url, got '{0}'")]
    Malformed(String),
}

impl FromStr for ServerSource {
    type Err = ParseServerError;

    /// Parse `id=url`, or a bare URL that doubles as its own id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((id, url)) if !id.is_empty() && !url.is_empty() => Ok(Self::new(id, url)),
            Some(_) => Err(ParseServerError::Malformed(s.to_string())),
            None if !s.is_empty() => Ok(Self::new(s, s)),
            None => Err(ParseServerError::Empty),
        }
    }
}

/// A server polled on every scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoredServer {
    pub id: String,
    pub status_url: String,
}

/// Health State enum.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Down = 0,
    Up = 1,
}

impl HealthState {
    /// Gauge value for this state.
    pub fn value(self) -> f64 {
        f64::from(self as u8)
    }
}

/// Health of one server for one scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthSample {
    pub server_id: String,
    pub state: HealthState,
}

/// Collector reporting per-server up/down state.
pub struct HealthzCollector {
    client: StatusClient,
    servers: Vec<MonitoredServer>,
    state: MetricDesc,
}

impl HealthzCollector {
    /// Create a collector with the default status client.
    pub fn new(namespace: &str, endpoint: &str, servers: &[ServerSource]) -> Self {
        Self::with_client(namespace, endpoint, servers, StatusClient::default())
    }

    /// Create a collector that polls through `client`.
    pub fn with_client(
        namespace: &str,
        endpoint: &str,
        servers: &[ServerSource],
        client: StatusClient,
    ) -> Self {
        let servers = servers
            .iter()
            .map(|s| MonitoredServer {
                id: s.id.clone(),
                status_url: format!("{}{}", s.url, SERVERZ_PATH),
            })
            .collect();

        Self {
            client,
            servers,
            state: MetricDesc::gauge(
                build_fq_name(namespace, endpoint, "state"),
                "state",
                &[SERVER_ID_LABEL],
            ),
        }
    }

    /// The registered servers, in registration order.
    pub fn servers(&self) -> &[MonitoredServer] {
        &self.servers
    }

    /// The state gauge descriptor.
    pub fn descriptor(&self) -> &MetricDesc {
        &self.state
    }

    /// Probe every server once. Always yields one sample per server.
    pub async fn collect_health(&self) -> Vec<HealthSample> {
        join_all(self.servers.iter().map(|server| self.probe(server))).await
    }

    async fn probe(&self, server: &MonitoredServer) -> HealthSample {
        let state = match self
            .client
            .fetch_json::<StreamingServerz>(&server.status_url)
            .await
        {
            Ok(resp) if resp.server_id.is_empty() => {
                tracing::debug!(server_id = %server.id, "ignoring server: empty server_id in status response");
                HealthState::Down
            }
            Ok(_) => HealthState::Up,
            Err(e) => {
                tracing::debug!(server_id = %server.id, error = %e, "ignoring server");
                HealthState::Down
            }
        };

        HealthSample {
            server_id: server.id.clone(),
            state,
        }
    }
}

impl Collector for HealthzCollector {
    fn describe(&self) -> Vec<MetricDesc> {
        vec![self.state.clone()]
    }

    fn collect(&self) -> BoxFuture<'_, Vec<MetricSample>> {
        Box::pin(async move {
            self.collect_health()
                .await
                .into_iter()
                .map(|sample| MetricSample {
                    name: self.state.fq_name.clone(),
                    labels: vec![(SERVER_ID_LABEL.to_string(), sample.server_id)],
                    value: sample.state.value(),
                })
                .collect()
        })
    }
}
