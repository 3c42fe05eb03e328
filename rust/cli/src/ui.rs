//! UI helper functions for terminal output formatting.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Warn that a command was not understood and point at the help input.
pub fn warn_unknown_input(err: &mut dyn Write, input: &str) -> std::io::Result<()> {
    writeln!(
        err,
        "WARNING: Unknown input '{}'. Type h for help.",
        input
    )
}
