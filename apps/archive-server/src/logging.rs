//! Process-wide `tracing` subscriber.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter directive used when neither `--log-level` nor `RUST_LOG` is set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            level: "info".to_owned(),
        }
    }
}

/// Pick the filter: CLI flag, then `RUST_LOG`, then the configured level.
///
/// # Errors
/// Returns an error if the chosen directive does not parse.
pub fn build_filter(cfg: &LoggingConfig, cli_level: Option<&str>) -> anyhow::Result<EnvFilter> {
    if let Some(level) = cli_level {
        return Ok(EnvFilter::try_new(level)?);
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    Ok(EnvFilter::try_new(&cfg.level)?)
}

/// Install the global subscriber.
///
/// # Errors
/// Returns an error if the filter is invalid or a subscriber is already installed.
pub fn init(cfg: &LoggingConfig, cli_level: Option<&str>) -> anyhow::Result<()> {
    let filter = build_filter(cfg, cli_level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match cfg.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
