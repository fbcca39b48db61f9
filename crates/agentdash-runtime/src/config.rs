//! Validated scheduler configuration.

use std::time::Duration;

use thiserror::Error;

use crate::cli::WatchOpts;

/// Uptime and wall-clock refresh period.
pub const CLOCK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be greater than zero")]
    ZeroInterval { name: &'static str },

    #[error("base URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub base_url: String,
    pub status_interval: Duration,
    pub refresh_interval: Duration,
    pub clock_interval: Duration,
    pub max_logs: usize,
}

impl DashboardConfig {
    pub fn from_opts(base_url: &str, opts: &WatchOpts) -> Result<Self, ConfigError> {
        let base_url = validate_base_url(base_url)?;
        if opts.status_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "status interval",
            });
        }
        if opts.refresh_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "refresh interval",
            });
        }
        Ok(Self {
            base_url,
            status_interval: Duration::from_millis(opts.status_interval_ms),
            refresh_interval: Duration::from_millis(opts.refresh_interval_ms),
            clock_interval: CLOCK_INTERVAL,
            max_logs: opts.max_logs.max(1),
        })
    }
}

/// Trim a trailing slash so endpoint paths can be appended directly.
pub fn validate_base_url(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl(url.to_string()))
    }
}
