mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};

use regintel_core::config::{load_dotenv, Config};

use crate::cli::{CliArgs, Command};

fn main() -> Result<()> {
    // stdout carries command output, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    load_dotenv();
    let args = CliArgs::parse();

    let config = match args.profile.as_deref() {
        Some(profile) => Config::for_profile(profile),
        None => Config::from_env(),
    };
    config.validate().context("invalid configuration")?;
    config.log_summary();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Chunk { path, strategy } => commands::chunk(&config, &path, strategy, &mut out)?,
        Command::Select {
            query,
            candidates,
            corpus,
            format,
        } => commands::select(&config, &query, &candidates, corpus.as_deref(), format, &mut out)?,
        Command::Config => commands::show_config(&config, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
