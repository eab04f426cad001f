//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the exporter.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::collector::{ServerSource, CORE_SYSTEM};

/// Root configuration for the exporter.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ExporterConfig {
    /// Scrape endpoint settings.
    pub listener: ListenerConfig,

    /// Which collector to build and how to name its metrics.
    pub collector: CollectorConfig,

    /// Status client settings.
    pub http: HttpClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Monitored servers.
    pub servers: Vec<ServerSource>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:7777").
    pub bind_address: String,

    /// Path the metrics are served on.
    pub metrics_path: String,

    /// Upper bound on a single scrape in seconds.
    pub scrape_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:7777".to_string(),
            metrics_path: "/metrics".to_string(),
            scrape_timeout_secs: 10,
        }
    }
}

/// Collector naming.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Metric namespace (system name).
    pub system: String,

    /// Endpoint name, the middle part of the metric name.
    pub endpoint: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            system: CORE_SYSTEM.to_string(),
            endpoint: "healthz".to_string(),
        }
    }
}

/// Status client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Per-fetch timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
