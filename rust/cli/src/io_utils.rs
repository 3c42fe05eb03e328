//! Input and filesystem helpers shared by the commands.
//!
//! - Reading one line of interactive input
//! - Ensuring parent directories exist before a save is written

use std::io::BufRead;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// Trims surrounding whitespace and returns `None` on EOF or read errors.
///
/// # Example
///
/// ```rust,no_run
/// use std::io::{self, BufRead};
/// # use klondike_cli::io_utils::read_stdin_line;
///
/// let stdin = io::stdin();
/// let mut handle = stdin.lock();
/// if let Some(line) = read_stdin_line(&mut handle) {
///     println!("You entered: {}", line);
/// }
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => {
            let trimmed = line.trim();
            Some(trimmed.to_string())
        }
        Err(_) => None, // Read error
    }
}

/// Ensure parent directory exists for given path, creating if needed.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// # use klondike_cli::io_utils::ensure_parent_dir;
///
/// let path = Path::new(".klondike/key-0.bin");
/// ensure_parent_dir(path).unwrap();
/// ```
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}
