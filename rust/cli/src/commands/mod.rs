//! Command handler modules for the Klondike CLI.
//!
//! Each subcommand lives in its own module with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in as parameters
//! - Errors propagated via the `CliError` enum

mod cfg;
mod deal;
mod play;
mod settings;
mod show;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::handle_play_command;
pub use settings::handle_settings_command;
pub use show::handle_show_command;

use std::io::Write;

use klondike_engine::engine::{Clock, FixedClock, SystemClock};

use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;

/// Resolve the configuration, reporting a bad one on `err`.
pub(crate) fn load_config(err: &mut dyn Write) -> Result<Config, CliError> {
    match config::load() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            Err(CliError::Config(format!("Invalid configuration: {}", e)))
        }
    }
}

/// A fixed seed when one is given, the wall clock otherwise.
pub(crate) fn clock_for(seed: Option<u32>) -> Box<dyn Clock> {
    match seed {
        Some(seed) => Box::new(FixedClock(seed)),
        None => Box::new(SystemClock),
    }
}
