//! Collector subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (once):
//!     host → describe() → Vec<MetricDesc>
//!
//! Scrape (every cycle):
//!     host → collect()
//!          → status.rs (GET <base_url>/streaming/serverz, decode JSON)
//!          → healthz.rs (fetch outcome → Up / Down)
//!          → Vec<MetricSample>, one per registered server
//! ```
//!
//! # Design Decisions
//! - Collectors are pull-based: no background polling, no retained samples
//! - The server list is fixed at construction, so metric cardinality is fixed
//! - A failed fetch degrades one sample, never the whole scrape

pub mod healthz;
pub mod status;

use futures_util::future::BoxFuture;
use serde::Serialize;

pub use healthz::{
    is_healthz_endpoint, HealthSample, HealthState, HealthzCollector, MonitoredServer, ParseServerError,
    ServerSource,
};
pub use status::{FetchError, StatusClient, StreamingServerz};

/// Name of the core server system.
pub const CORE_SYSTEM: &str = "gnatsd";

/// Kind of metric a descriptor announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Gauge,
}

/// Static metadata for one metric family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricDesc {
    /// Fully-qualified metric name.
    pub fq_name: String,
    /// Help text.
    pub help: String,
    pub kind: MetricKind,
    /// Label names, in the order sample label values are given.
    pub variable_labels: Vec<String>,
}

impl MetricDesc {
    pub fn gauge(fq_name: impl Into<String>, help: impl Into<String>, labels: &[&str]) -> Self {
        Self {
            fq_name: fq_name.into(),
            help: help.into(),
            kind: MetricKind::Gauge,
            variable_labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// One observed value of a described metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSample {
    pub name: String,
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

/// A pull-based metric source.
///
/// `describe` must be side-effect free and return the same descriptors on
/// every call. `collect` is invoked once per scrape and must not fail as a
/// whole; individual problems degrade individual samples.
pub trait Collector: Send + Sync {
    fn describe(&self) -> Vec<MetricDesc>;

    fn collect(&self) -> BoxFuture<'_, Vec<MetricSample>>;
}

/// Join the non-empty name parts with `_`.
pub fn build_fq_name(namespace: &str, subsystem: &str, name: &str) -> String {
    [namespace, subsystem, name]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}
