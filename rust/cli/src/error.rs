//! Error types for the CLI application.

use std::fmt;

use klondike_engine::errors::PersistError;

use crate::config::ConfigError;

/// Custom error type for CLI operations.
///
/// This enum encompasses all error types that can occur during CLI execution,
/// allowing for proper error propagation using the `?` operator.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (stdout/stderr writes, stdin reads)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(String),

    /// Saved game could not be written
    Persist(PersistError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Persist(e) => write!(f, "Save error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Persist(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<PersistError> for CliError {
    fn from(error: PersistError) -> Self {
        CliError::Persist(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::Engine(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klondike_engine::errors::StoreError;

    #[test]
    fn persist_errors_keep_their_source() {
        let error = CliError::from(PersistError::Store(StoreError::Write {
            key: 0,
            reason: "disk full".to_string(),
        }));
        assert!(error.to_string().starts_with("Save error:"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn config_errors_render_message() {
        let error = CliError::from(ConfigError::Invalid("Invalid draw".into()));
        assert_eq!(error.to_string(), "Configuration error: Invalid draw");
    }
}
