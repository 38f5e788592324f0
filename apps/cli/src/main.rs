//! # cartprice
//!
//! Prices carts and checks voucher codes from JSON requests.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          cartprice binary                               │
//! │                                                                         │
//! │  AppConfig ──► tracing ──► InMemoryReferenceData ──► CachedProvider    │
//! │                                                          │              │
//! │  request JSON ──────────────────────────► PricingPipeline              │
//! │                                                          │              │
//! │                          stdout ◄── breakdown / ErrorResponse JSON     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exit Codes
//! - `0` result printed
//! - `1` configuration, I/O or malformed request
//! - `2` pricing refusal (`ErrorResponse` printed on stdout)

mod cli;
mod config;
mod error;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use cartprice_core::{PricingPipeline, ReferenceDataProvider};
use cartprice_refdata::{CachedProvider, InMemoryReferenceData};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Outcome};
use crate::config::AppConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected) => ExitCode::from(2),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let mut config =
        AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(path) = &cli.data {
        config.reference_data_path = path.clone();
    }

    init_tracing(&config.log_level)?;
    info!(
        data = %config.reference_data_path.display(),
        cache = config.cache.enabled,
        "Configuration loaded"
    );

    let provider = build_provider(&config)?;
    let pipeline = PricingPipeline::new(provider);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::execute(&cli.command, &pipeline, &mut out)
}

/// Logs go to stderr so stdout carries only JSON. `RUST_LOG` overrides the
/// configured level.
fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level '{}'", level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn build_provider(config: &AppConfig) -> anyhow::Result<Arc<dyn ReferenceDataProvider>> {
    let data = InMemoryReferenceData::load(&config.reference_data_path)?;

    let provider: Arc<dyn ReferenceDataProvider> = match config.cache.policy() {
        Some(policy) => {
            debug!(?policy, "Caching reference data");
            Arc::new(CachedProvider::new(data, policy))
        }
        None => Arc::new(data),
    };

    Ok(provider)
}
