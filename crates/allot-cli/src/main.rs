//! `allot` - share link tool
//!
//! Logs go to stderr (`RUST_LOG`, default `warn`); results go to stdout.

mod cli;
mod commands;
mod io;

use allot_core::ShareConfig;
use anyhow::Result;
use clap::ArgMatches;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(matches: &ArgMatches) -> Result<u8> {
    let mut config = ShareConfig::from_env();
    if let Some(url) = matches.get_one::<String>("app-url") {
        config = config.with_app_url(url.as_str());
    }
    tracing::debug!(app_url = %config.app_url, "configuration loaded");

    match matches.subcommand() {
        Some(("encode", args)) => commands::encode(&config, args),
        Some(("decode", args)) => commands::decode(args),
        Some(("resolve", args)) => commands::resolve(&config, args).await,
        Some(("share", args)) => commands::share(config, args).await,
        _ => Ok(commands::EXIT_OK),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let matches = cli::build().get_matches();

    match run(&matches).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
