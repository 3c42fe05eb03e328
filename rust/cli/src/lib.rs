//! # Klondike CLI Library
//!
//! Terminal front end for the Klondike engine: play the saved game line by line,
//! deal boards for inspection, change settings and inspect configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Available Subcommands
//!
//! - `play`: Play the saved game (or a new one), one command per input line
//! - `deal`: Deal a single game for inspection
//! - `show`: Print the saved game, as text or JSON
//! - `settings`: Toggle draw mode, cycle flip limit or score visibility, reset the score
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::{BufRead, Write};
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
mod macros;
pub mod store;
pub mod ui;

use cli::{Commands, KlondikeCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_play_command, handle_settings_command,
    handle_show_command,
};

pub use config::{Config, ConfigError};
pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["klondike", "deal", "--seed", "42"];
/// let code = klondike_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    run_inner(args, out, err, None)
}

/// Like [`run`], but `play` reads its input lines from `input` instead of stdin.
///
/// # Example
///
/// ```no_run
/// use std::io;
/// let mut input = io::Cursor::new("u\ns\nq\n");
/// let code = klondike_cli::run_with_input(
///     ["klondike", "play", "--new", "--seed", "1"],
///     &mut io::stdout(),
///     &mut io::stderr(),
///     &mut input,
/// );
/// assert_eq!(code, 0);
/// ```
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    input: &mut dyn BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    run_inner(args, out, err, Some(input))
}

fn run_inner<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    input: Option<&mut dyn BufRead>,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "deal", "show", "settings", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = KlondikeCli::try_parse_from(&argv);
    let cli = match parsed {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Klondike Solitaire CLI");
                    write_or_exit!(err, "Usage: klondike <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: klondike --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Play { seed, new } => match input {
            Some(input) => handle_play_command(seed, new, out, err, input),
            None => {
                // Use stdin for real input (supports both TTY and piped stdin)
                let stdin = std::io::stdin();
                let mut stdin_lock = stdin.lock();
                handle_play_command(seed, new, out, err, &mut stdin_lock)
            }
        },
        Commands::Deal { seed, draw } => handle_deal_command(seed, draw.map(Into::into), out, err),
        Commands::Show { json } => handle_show_command(json, out, err),
        Commands::Settings { action } => handle_settings_command(action, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
    };
    match result {
        Ok(()) => exit_code::SUCCESS,
        // already reported by the handler
        Err(CliError::Config(_)) => exit_code::ERROR,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
