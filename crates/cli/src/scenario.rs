//! Simulated board scenarios.
//!
//! A scenario describes the board on the jig and how the run should be
//! configured:
//!
//! ```yaml
//! config:
//!   settle_ms: 10
//! faults:
//!   - fault: open
//!     segment: 2
//!     node: { digit: 0 }
//!   - fault: no_high_voltage
//!     segment: 4
//! fail_appends: [3]
//! fail_create: false
//! ```

use std::fs;
use std::path::Path;

use ntd_fault_queue::FailingArena;
use ntd_hal::{InjectedFault, SimulatedJig};
use ntd_sequencer::SequencerConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    /// Sequencer timing and pin map.
    pub config: SequencerConfig,
    /// Defects on the simulated board.
    pub faults: Vec<InjectedFault>,
    /// Append attempts (1-based) whose storage allocation fails.
    pub fail_appends: Vec<usize>,
    /// Fail the fault queue's initial allocation.
    pub fail_create: bool,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Err(CliError::ScenarioNotFound(path.display().to_string()));
        }
        let text = fs::read_to_string(path)?;
        let scenario = Self::from_yaml(&text)?;
        debug!(path = %path.display(), faults = scenario.faults.len(), "scenario loaded");
        Ok(scenario)
    }

    pub fn from_yaml(text: &str) -> Result<Self, CliError> {
        let scenario: Self = serde_yaml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<(), CliError> {
        self.config.validate()?;
        if self.fail_appends.contains(&0) {
            return Err(CliError::InvalidScenario(
                "fail_appends ordinals start at 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Storage policy for the fault queue.
    pub fn arena(&self) -> FailingArena {
        if self.fail_create {
            FailingArena::on_create()
        } else {
            FailingArena::on_appends(self.fail_appends.iter().copied())
        }
    }

    pub fn jig(&self) -> SimulatedJig {
        SimulatedJig::with_faults(self.faults.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntd_hal::Node;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn empty_scenario_is_healthy_board() -> TestResult {
        let scenario = Scenario::from_yaml("{}")?;
        assert_eq!(scenario, Scenario::default());
        assert!(scenario.jig().faults().is_empty());
        Ok(())
    }

    #[test]
    fn parse_faults() -> TestResult {
        let scenario = Scenario::from_yaml(
            "faults:\n  - fault: open\n    segment: 2\n    node: { digit: 0 }\n  - fault: short\n    segment: 1\n    when: blank\n    lights: decimal_point\n",
        )?;
        assert_eq!(
            scenario.faults,
            vec![
                InjectedFault::Open {
                    segment: 2,
                    node: Node::ZERO
                },
                InjectedFault::Short {
                    segment: 1,
                    when: Node::Blank,
                    lights: Node::DecimalPoint
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn parse_config_override() -> TestResult {
        let scenario = Scenario::from_yaml("config:\n  settle_ms: 25\n")?;
        assert_eq!(scenario.config.settle_ms, 25);
        assert_eq!(
            scenario.config.segment_select_settle_ms,
            SequencerConfig::default().segment_select_settle_ms
        );
        Ok(())
    }

    #[test]
    fn reject_invalid_config() {
        let result = Scenario::from_yaml("config:\n  settle_ms: 0\n");
        assert!(matches!(result, Err(CliError::InvalidConfiguration(_))));
    }

    #[test]
    fn reject_unknown_keys() {
        assert!(matches!(
            Scenario::from_yaml("fautls: []\n"),
            Err(CliError::YamlError(_))
        ));
    }

    #[test]
    fn reject_zero_ordinal() {
        assert!(matches!(
            Scenario::from_yaml("fail_appends: [0]\n"),
            Err(CliError::InvalidScenario(_))
        ));
    }
}
