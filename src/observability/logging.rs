//! Structured logging.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and to `tower_http` request tracing. Logs go to stderr so binaries can
//! keep stdout for their own output.
//!
//! The subscriber is installed before configuration is read, so config errors
//! are logged too. Once the config is known the level is swapped in place.

use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

/// Level used until configuration has been read.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default filter directives for `level`.
pub fn default_directives(level: &str) -> String {
    format!("healthz_exporter={level},tower_http={level}")
}

/// Handle to the installed subscriber's filter.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Switch to `level`. A filter taken from `RUST_LOG` is left alone.
    pub fn set_level(&self, level: &str) {
        if self.from_env {
            return;
        }
        if let Err(e) = self.filter.reload(EnvFilter::new(default_directives(level))) {
            tracing::warn!(error = %e, level, "Failed to change log level");
        }
    }
}

/// Install the global tracing subscriber.
///
/// Returns `None` if a subscriber was already installed.
pub fn init_logging(level: &str) -> Option<LogHandle> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_directives(level)), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    match tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
    {
        Ok(()) => Some(LogHandle {
            filter: handle,
            from_env,
        }),
        Err(e) => {
            eprintln!("failed to install tracing subscriber: {e}");
            None
        }
    }
}
