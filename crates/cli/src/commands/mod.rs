//! Command implementations for ntdctl CLI

pub mod pins;
pub mod run;

use clap::Args;
use std::path::PathBuf;

use ntd_hal::SEGMENT_COUNT;

/// How a diagnostic run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every check passed.
    Passed,
    /// At least one fault was found or dropped.
    FaultsFound,
    /// The fault queue could not be created and the jig halted.
    Halted,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Passed => 0,
            Outcome::FaultsFound => 2,
            Outcome::Halted => 3,
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Scenario file describing the simulated board (YAML)
    #[arg(short, long, env = "NTDCTL_SCENARIO")]
    pub scenario: Option<PathBuf>,

    /// Test a single segment instead of the whole panel
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..SEGMENT_COUNT as i64))]
    pub segment: Option<u8>,
}

#[derive(Args, Debug)]
pub struct PinsArgs {
    /// Show the pin map from this scenario instead of the default wiring
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,
}
