//! CLI definition using clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default API base URL (the dashboard server's default port).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8790";

#[derive(Parser)]
#[command(name = "agentdash", about = "Terminal dashboard for an agent status API")]
pub struct Cli {
    /// Base URL of the dashboard API
    #[arg(long, short = 'u', global = true, env = "AGENTDASH_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Live dashboard (default)
    Watch(WatchOpts),
    /// Fetch everything once and print the dashboard
    Once(OnceOpts),
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct WatchOpts {
    /// Status poll interval in milliseconds
    #[arg(long, env = "AGENTDASH_STATUS_INTERVAL_MS", default_value_t = 2000)]
    pub status_interval_ms: u64,

    /// Projects/stats refresh interval in milliseconds
    #[arg(long, env = "AGENTDASH_REFRESH_INTERVAL_MS", default_value_t = 30_000)]
    pub refresh_interval_ms: u64,

    /// Activity feed capacity
    #[arg(long, default_value_t = agentdash_core::MAX_LOGS)]
    pub max_logs: usize,

    /// Print one line per change instead of the full-screen view
    #[arg(long)]
    pub plain: bool,

    /// Write logs to this file (the full-screen view logs nowhere otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for WatchOpts {
    fn default() -> Self {
        Self {
            status_interval_ms: 2000,
            refresh_interval_ms: 30_000,
            max_logs: agentdash_core::MAX_LOGS,
            plain: false,
            log_file: None,
        }
    }
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct OnceOpts {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
