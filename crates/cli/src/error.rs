//! Error types for ntdctl CLI

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Invalid configuration")]
    InvalidConfiguration(#[from] ntd_sequencer::ConfigError),

    #[error("IO error")]
    IoError(#[from] std::io::Error),

    #[error("JSON error")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Report error")]
    ReportError(#[from] ntd_report::ReportError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::ScenarioNotFound(_)
            | CliError::InvalidScenario(_)
            | CliError::InvalidConfiguration(_)
            | CliError::YamlError(_) => 4,
            _ => 1,
        }
    }
}
