//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem before anything else runs
//! - Apply the configured log level once the config is loaded
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Logs go to stderr; stdout is reserved for the deployment summary
//! - `RUST_LOG` overrides the configured level

use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Level used until the config file has been read.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the filter: `RUST_LOG` if set, otherwise the given level for this
/// crate and `warn` for dependencies.
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,token_deployer={log_level}")))
}

/// Handle for changing the level after startup.
#[derive(Debug, Clone)]
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Switch to the configured level. A set `RUST_LOG` keeps winning.
    pub fn set_level(&self, log_level: &str) {
        if let Err(e) = self.filter.reload(env_filter(log_level)) {
            tracing::warn!(error = %e, "Failed to apply configured log level");
        }
    }
}

/// Install the global subscriber with the default level.
///
/// Returns `None` when a subscriber is already installed.
pub fn init() -> Option<LogHandle> {
    let (filter, handle) = reload::Layer::new(env_filter(DEFAULT_LOG_LEVEL));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok()?;
    Some(LogHandle { filter: handle })
}
