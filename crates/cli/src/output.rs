//! Output formatting for CLI responses

use std::io::{self, Write};

use anyhow::Error;
use colored::*;
use serde_json::json;

use ntd_fault_queue::{FaultQueue, RecordArena};
use ntd_hal::PinMap;
use ntd_report::{JsonReport, write_text_to};
use ntd_sequencer::{RunSummary, SessionError};

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": format!("{error:#}"),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);
    print_causes(error.source());
}

fn print_causes(mut source: Option<&(dyn std::error::Error + 'static)>) {
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::ScenarioNotFound(_)) => "scenario_not_found",
        Some(CliError::InvalidScenario(_)) => "invalid_scenario",
        Some(CliError::InvalidConfiguration(_)) => "invalid_configuration",
        Some(CliError::IoError(_)) => "io_error",
        Some(CliError::JsonError(_)) => "json_error",
        Some(CliError::YamlError(_)) => "yaml_error",
        Some(CliError::ReportError(_)) => "report_error",
        None => "unknown",
    }
}

/// Print the fault report and verdict of a run
pub fn print_run<A: RecordArena>(
    queue: &FaultQueue<A>,
    summary: &RunSummary,
    json: bool,
) -> Result<(), CliError> {
    if json {
        let output = json!({
            "success": true,
            "passed": summary.passed(),
            "summary": summary,
            "report": JsonReport::from_queue(queue).to_value()?,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let stdout = io::stdout();
    write_text_to(stdout.lock(), queue)?;

    let verdict = if summary.passed() {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    };
    println!(
        "{} {} segment(s) tested, {} fault(s) recorded, {} dropped",
        verdict, summary.segments_tested, summary.faults_recorded, summary.faults_dropped
    );
    if summary.faults_dropped > 0 {
        println!(
            "{}",
            "Some faults could not be stored; the report is incomplete".yellow()
        );
    }
    Ok(())
}

/// Print the fatal halt notice
pub fn print_halt(error: &SessionError, json: bool) -> Result<(), CliError> {
    if json {
        let output = json!({
            "success": false,
            "halted": true,
            "error": {
                "message": format!("{:#}", anyhow::Error::new(error.clone())),
                "type": "fatal_halt"
            }
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        eprintln!("{} {}", "HALTED:".red().bold(), error);
        print_causes(std::error::Error::source(error));
        eprintln!("  {}", "Status LED is signalling distress; power-cycle the jig".yellow());
    }
    Ok(())
}

/// Print the pin map
pub fn print_pins(pins: &PinMap, json: bool) -> Result<(), CliError> {
    let assignments = pins.assignments();
    if json {
        let map: serde_json::Map<String, serde_json::Value> = assignments
            .into_iter()
            .map(|(line, pin)| (line, serde_json::Value::String(pin.to_string())))
            .collect();
        let output = json!({
            "success": true,
            "pins": map
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", "Pin Map:".bold())?;
    for (line, pin) in &assignments {
        writeln!(stdout, "  {:<10} {}", line, pin.to_string().cyan())?;
    }
    Ok(())
}
