//! Prometheus exporter reporting the up/down state of monitored servers.

pub mod collector;
pub mod config;
pub mod exporter;
pub mod lifecycle;
pub mod observability;

pub use collector::{Collector, HealthzCollector};
pub use config::schema::ExporterConfig;
pub use exporter::{HttpServer, MetricsRegistry};
pub use lifecycle::Shutdown;
