//! CLI error type.

use overplay::config::ConfigError;
use overplay::screen::BuildError;
use thiserror::Error;

/// Everything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Simulation failed: {0}")]
    Simulate(String),

    #[error("Could not set up the playback screen: {0}")]
    Build(#[from] BuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            _ => 1,
        }
    }
}
