#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Metro Mayhem headlessly with a scripted player.

mod config;
mod player;
mod session;

use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::session::Session;

/// Metro Mayhem - a deterministic tower-defence simulation
#[derive(Parser, Debug)]
#[command(name = "metro-mayhem")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding the default tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed (default: value from the config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum ticks to simulate (default: 20000)
    #[arg(short, long, default_value = "20000")]
    ticks: u32,

    /// Wall-clock length of a tick in milliseconds (default: 100)
    #[arg(long, default_value = "100")]
    tick_ms: u64,

    /// Fast-forward multiplier applied to every tick
    #[arg(long)]
    time_scale: Option<f32>,

    /// Log filter such as `info` or `metro_mayhem_world=debug` (default: RUST_LOG or info)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter `{directive}`"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

fn run(args: Args) -> Result<()> {
    init_tracing(args.log_level.as_deref())?;

    let mut settings = config::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        settings.game.seed = seed;
    }
    info!(seed = settings.game.seed, ticks = args.ticks, "starting session");

    let mut session = Session::new(settings);
    println!("{}", session.banner());

    if let Some(multiplier) = args.time_scale {
        session
            .set_time_scale(multiplier)
            .with_context(|| format!("cannot fast-forward by {multiplier}"))?;
    }

    let summary = session.run(args.ticks, Duration::from_millis(args.tick_ms));
    info!(phase = ?session.phase(), "final phase");
    println!("{summary}");
    Ok(())
}

/// Entry point for the Metro Mayhem command-line interface.
fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
