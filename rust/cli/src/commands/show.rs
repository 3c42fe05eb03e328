//! Show command handler: print the saved game without changing it.

use std::io::Write;

use klondike_engine::engine::Engine;

use super::{clock_for, load_config};
use crate::error::CliError;
use crate::formatters::render_board;
use crate::store::FileStore;

/// Handle the show command.
///
/// With no usable save a fresh game is dealt for display only; nothing is written.
pub fn handle_show_command(
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let config = load_config(err)?;
    let store = FileStore::new(&config.save_dir);
    let clock = clock_for(config.seed);
    let engine = Engine::load_or_deal(&store, config.settings(), clock.as_ref());
    let view = engine.view();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
    } else {
        render_board(&view, out)?;
    }
    Ok(())
}
