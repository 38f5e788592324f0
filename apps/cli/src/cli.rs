//! Command-line surface and command execution.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use cartprice_core::{
    CalculateRequest, ErrorResponse, PricingPipeline, PricingResult, ReferenceDataProvider,
    ValidateCodeRequest,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "cartprice", about = "Cart discount pricing", version, long_about = None)]
pub struct Cli {
    /// TOML config file
    #[arg(long, global = true, env = "CARTPRICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reference data snapshot (JSON); overrides the configured path
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a cart and print the breakdown
    Calculate(RequestArgs),
    /// Check whether a voucher code can be used for a cart
    Validate(RequestArgs),
}

#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Request JSON file, or `-` for stdin
    #[arg(long, default_value = "-")]
    pub request: String,
}

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Result JSON was printed.
    Success,
    /// The pipeline refused the request; an `ErrorResponse` was printed.
    Rejected,
}

/// Runs one command against a pipeline, writing JSON to `out`.
pub fn execute<P, W>(
    command: &Command,
    pipeline: &PricingPipeline<P>,
    out: &mut W,
) -> anyhow::Result<Outcome>
where
    P: ReferenceDataProvider,
    W: Write,
{
    match command {
        Command::Calculate(args) => {
            let request: CalculateRequest = parse_request(&args.request)?;
            let result = pipeline.calculate(&request);
            if let Ok(breakdown) = &result {
                info!(final_total = %breakdown.final_total, "Calculation finished");
            }
            respond(result, out)
        }
        Command::Validate(args) => {
            let request: ValidateCodeRequest = parse_request(&args.request)?;
            respond(pipeline.validate_code(&request), out)
        }
    }
}

fn respond<T, W>(result: PricingResult<T>, out: &mut W) -> anyhow::Result<Outcome>
where
    T: Serialize,
    W: Write,
{
    match result {
        Ok(value) => {
            write_json(out, &value)?;
            Ok(Outcome::Success)
        }
        Err(err) => {
            let response = ErrorResponse::from(err);
            warn!(code = %response.code, status = response.status(), "Request rejected");
            write_json(out, &response)?;
            Ok(Outcome::Rejected)
        }
    }
}

fn write_json<T: Serialize, W: Write>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to write JSON output")?;
    writeln!(out)?;
    Ok(())
}

fn parse_request<T: serde::de::DeserializeOwned>(source: &str) -> anyhow::Result<T> {
    let json = read_source(source)?;
    serde_json::from_str(&json)
        .with_context(|| format!("invalid request JSON in {}", display_source(source)))
}

fn read_source(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("failed to read request from stdin")?;
        return Ok(json);
    }

    std::fs::read_to_string(source)
        .with_context(|| format!("failed to read request file {}", source))
}

fn display_source(source: &str) -> &str {
    if source == "-" {
        "stdin"
    } else {
        source
    }
}
