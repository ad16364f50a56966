//! Diagnostic run command

use anyhow::Result;
use tracing::{error, info};

use ntd_sequencer::{DiagnosticSession, DistressSignal, RunSummary, SessionError};

use crate::commands::{Outcome, RunArgs};
use crate::error::CliError;
use crate::output;
use crate::scenario::Scenario;

/// Distress blinks shown before the CLI exits on a fatal halt.
const HALT_BLINK_CYCLES: u32 = 3;

/// Execute run command
pub fn execute(args: &RunArgs, json: bool) -> Result<Outcome> {
    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    let mut jig = scenario.jig();

    let mut session = match DiagnosticSession::start(scenario.config.clone(), scenario.arena()) {
        Ok(session) => session,
        Err(SessionError::Config(err)) => return Err(CliError::InvalidConfiguration(err).into()),
        Err(err) => {
            error!(error = %err, "fault queue unavailable, halting");
            DistressSignal::new(&mut jig, scenario.config.halt_blink_half_period_ms)
                .blink(HALT_BLINK_CYCLES);
            output::print_halt(&err, json)?;
            return Ok(Outcome::Halted);
        }
    };

    let summary = match args.segment {
        Some(segment) => {
            let dropped_before = session.queue().dropped();
            let faults_recorded = session.run_segment(&mut jig, segment);
            RunSummary {
                segments_tested: 1,
                faults_recorded,
                faults_dropped: session.queue().dropped().saturating_sub(dropped_before),
            }
        }
        None => session.run_all(&mut jig),
    };
    info!(elapsed_ms = jig.elapsed_ms(), "jig time spent settling");

    output::print_run(session.queue(), &summary, json)?;
    let released = session.reset();
    info!(released, "session closed");

    Ok(if summary.passed() {
        Outcome::Passed
    } else {
        Outcome::FaultsFound
    })
}
