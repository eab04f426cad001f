//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, bind address parses)
//! - Detect duplicate or malformed server entries
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ExporterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use std::str::FromStr;

use tracing::Level;
use url::Url;

use crate::collector::is_healthz_endpoint;
use crate::config::schema::ExporterConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no servers configured")]
    NoServers,

    #[error("server #{0} has an empty id")]
    EmptyServerId(usize),

    #[error("duplicate server id '{0}'")]
    DuplicateServerId(String),

    #[error("server '{id}' has an invalid url '{url}': {reason}")]
    InvalidServerUrl { id: String, url: String, reason: String },

    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("metrics path '{0}' must start with '/' and not be the root path")]
    InvalidMetricsPath(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("invalid log level '{0}' (expected trace, debug, info, warn or error)")]
    InvalidLogLevel(String),

    #[error("'{system}_{endpoint}' is not a supported collector endpoint")]
    UnsupportedEndpoint { system: String, endpoint: String },
}

/// Check `config` for semantic errors.
pub fn validate_config(config: &ExporterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(config.listener.bind_address.clone()));
    }
    if !config.listener.metrics_path.starts_with('/') || config.listener.metrics_path == "/" {
        errors.push(ValidationError::InvalidMetricsPath(config.listener.metrics_path.clone()));
    }
    if config.listener.scrape_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("listener.scrape_timeout_secs"));
    }
    if config.http.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("http.timeout_secs"));
    }

    if Level::from_str(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(config.observability.log_level.clone()));
    }

    if !is_healthz_endpoint(&config.collector.system, &config.collector.endpoint) {
        errors.push(ValidationError::UnsupportedEndpoint {
            system: config.collector.system.clone(),
            endpoint: config.collector.endpoint.clone(),
        });
    }

    if config.servers.is_empty() {
        errors.push(ValidationError::NoServers);
    }

    let mut seen = HashSet::new();
    for (i, server) in config.servers.iter().enumerate() {
        if server.id.is_empty() {
            errors.push(ValidationError::EmptyServerId(i));
        } else if !seen.insert(server.id.as_str()) {
            errors.push(ValidationError::DuplicateServerId(server.id.clone()));
        }

        if let Err(e) = Url::parse(&server.url) {
            errors.push(ValidationError::InvalidServerUrl {
                id: server.id.clone(),
                url: server.url.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
