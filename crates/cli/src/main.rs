//! ntdctl - NTD Test Jig Control CLI
//!
//! Runs the nixie display segment diagnostics against a simulated jig and
//! prints the fault report.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;
mod scenario;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{Outcome, PinsArgs, RunArgs};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "ntdctl")]
#[command(about = "NTD Test Jig CLI - Run nixie display segment diagnostics")]
#[command(version)]
#[command(long_about = "
ntdctl drives the NTD test jig's segment test sequencer against a simulated
board and prints the operator fault report.

Exit codes: 0 when the board passes, 2 when faults were found, 3 when the
fault queue could not be created and the jig halted, 4 for an invalid
scenario. Use --json for machine-readable output.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the segment diagnostics
    Run(RunArgs),

    /// Show the jig pin map
    Pins(PinsArgs),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so --json output stays parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "ntdctl={log_level},ntd_sequencer={log_level},ntd_fault_queue={log_level},ntd_report={log_level}"
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(exit_code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<Outcome> {
    match &cli.command {
        Commands::Run(args) => commands::run::execute(args, cli.json),
        Commands::Pins(args) => {
            commands::pins::execute(args, cli.json)?;
            Ok(Outcome::Passed)
        }
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(Outcome::Passed)
        }
    }
}
