//! Logging setup for the tracker binary.
//!
//! The subscriber is installed before the data directory is known so that
//! startup records are not lost. The filter starts from `RUST_LOG` or
//! `info`, and is swapped for the configured `log_filter` once the config
//! has been read, unless `RUST_LOG` was set.

use anyhow::{Context, Result};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

use crate::config::{TrackerConfig, DEFAULT_LOG_FILTER};

/// Handle for replacing the active log filter after startup
pub struct LogFilter {
    handle: reload::Handle<EnvFilter, Registry>,
    env_override: bool,
}

/// Install the global subscriber and return a handle to its filter
pub fn init() -> LogFilter {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let env_override = env_filter.is_some();
    let (filter_layer, log_filter) = reloadable(
        env_filter.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER)),
        env_override,
    );

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer())
        .init();

    log_filter
}

fn reloadable(
    filter: EnvFilter,
    env_override: bool,
) -> (reload::Layer<EnvFilter, Registry>, LogFilter) {
    let (layer, handle) = reload::Layer::new(filter);
    (layer, LogFilter { handle, env_override })
}

impl LogFilter {
    /// Switch to the configured filter; `RUST_LOG` keeps precedence
    pub fn apply_config(&self, config: &TrackerConfig) -> Result<()> {
        if self.env_override {
            return Ok(());
        }

        let filter = EnvFilter::try_new(&config.log_filter)
            .with_context(|| format!("Invalid log_filter '{}'", config.log_filter))?;
        self.handle
            .reload(filter)
            .context("Failed to apply configured log filter")?;
        Ok(())
    }

    /// Active filter directives, lowercased
    pub fn current(&self) -> Option<String> {
        self.handle
            .with_current(|filter| filter.to_string().to_lowercase())
            .ok()
    }
}
