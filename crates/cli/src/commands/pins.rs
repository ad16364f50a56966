//! Pin map command

use anyhow::Result;

use crate::commands::PinsArgs;
use crate::output;
use crate::scenario::Scenario;

/// Execute pins command
pub fn execute(args: &PinsArgs, json: bool) -> Result<()> {
    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    output::print_pins(&scenario.config.pins, json)?;
    Ok(())
}
