//! agentdash: terminal dashboard for an agent status API.
//! Polls the status, projects and stats endpoints and renders the result
//! full-screen, as plain lines, or once.

use std::fs::File;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Local;
use clap::Parser;

use agentdash_core::Dashboard;

mod cli;
mod client;
mod cmd_once;
mod config;
mod display;
mod plain;
mod poll_loop;
mod tui;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let command = args
        .command
        .unwrap_or_else(|| cli::Command::Watch(cli::WatchOpts::default()));

    match command {
        cli::Command::Watch(opts) => {
            init_logging(opts.log_file.as_deref(), !opts.plain)?;

            let config = config::DashboardConfig::from_opts(&args.url, &opts)?;
            let api = Arc::new(client::HttpApi::new(config.base_url.clone())?);
            tracing::info!(
                base_url = api.base_url(),
                status_ms = config.status_interval.as_millis() as u64,
                refresh_ms = config.refresh_interval.as_millis() as u64,
                "agentdash starting"
            );

            if opts.plain {
                run_plain(api, config).await;
            } else {
                tui::run_tui(api, config).await?;
            }
        }
        cli::Command::Once(opts) => {
            init_logging(None, false)?;
            let base_url = config::validate_base_url(&args.url)?;
            let api = client::HttpApi::new(base_url)?;
            cmd_once::cmd_once(&api, agentdash_core::MAX_LOGS, opts.json).await?;
        }
    }

    Ok(())
}

/// Line output until Ctrl-C or SIGTERM.
async fn run_plain(api: Arc<client::HttpApi>, config: config::DashboardConfig) {
    let stdout = std::io::stdout();
    let use_color = stdout.is_terminal();
    let now = Local::now();
    let dashboard = poll_loop::shared(Dashboard::new(
        plain::PlainRenderer::new(stdout, use_color),
        config.max_logs,
        now,
    ));
    dashboard.lock().await.start(now);

    tokio::select! {
        () = poll_loop::run_poll_loop(api, Arc::clone(&dashboard), &config) => {}
        () = poll_loop::shutdown_signal() => {}
    }
}

/// Log filter: `AGENTDASH_LOG`, then `RUST_LOG`, then `info`.
/// The full-screen view owns the terminal, so it logs only to `--log-file`.
fn init_logging(log_file: Option<&Path>, tui: bool) -> anyhow::Result<()> {
    let filter = std::env::var("AGENTDASH_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let builder =
        tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::new(filter));

    match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        None if !tui => builder.with_writer(std::io::stderr).init(),
        None => {}
    }
    Ok(())
}
