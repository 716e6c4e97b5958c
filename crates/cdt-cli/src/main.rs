//! # cdt CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Verbosity flags select the tracing filter; subcommand results map to
//! the exit-code scheme described in the crate docs.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cdt_cli::inspect::{run_inspect, InspectArgs};
use cdt_cli::plan::{run_plan, PlanArgs};
use cdt_cli::publish::{run_publish, PublishArgs};
use cdt_cli::validate::{run_validate, ValidateArgs};

/// Credential Design Tools CLI
///
/// Works with governance artifacts from the command line: plan where an
/// artifact will land, validate it, publish it as a pull request, and
/// inspect OpenAPI documents.
#[derive(Parser, Debug)]
#[command(name = "cdt", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dry-run the placement planner for a payload file.
    Plan(PlanArgs),

    /// Publish an artifact file as a governance pull request.
    Publish(PublishArgs),

    /// Validate artifact documents against their kind's rules.
    Validate(ValidateArgs),

    /// Summarize an OpenAPI document (JSON or YAML).
    Inspect(InspectArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Plan(args) => run_plan(&args).await,
        Commands::Publish(args) => run_publish(&args).await,
        Commands::Validate(args) => run_validate(&args),
        Commands::Inspect(args) => run_inspect(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
