use anyhow::Context;
use clap::Parser;
use tracing::{debug, Level};
use tracing_appender::rolling;

mod cli;
mod commands;

use cli::Cli;
use hris_client::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    // Rolling daily log; stdout stays free for command output
    let file_appender = rolling::daily(&config.log_dir, "hris.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    debug!(base_url = %config.base_url(), "Configuration loaded");

    commands::run(cli, config).await
}
