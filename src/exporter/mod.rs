//! Exporter subsystem: hosts collectors behind one scrape endpoint.
//!
//! # Data Flow
//! ```text
//! GET /metrics
//!     → server.rs (axum handler, scrape timeout)
//!     → registry.rs gather()
//!         → every Collector::collect() concurrently
//!         → render through a scrape-local PrometheusRecorder
//!     → text/plain exposition
//! ```

pub mod registry;
pub mod server;

pub use registry::{MetricsRegistry, RegistryError};
pub use server::HttpServer;
