//! Observability subsystem.
//!
//! Logs go through `tracing`; the exporter's own product is metrics, so there is
//! no separate self-metrics layer.

pub mod logging;

pub use logging::{init_logging, LogHandle, DEFAULT_LOG_LEVEL};
