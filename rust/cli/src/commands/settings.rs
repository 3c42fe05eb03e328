//! Settings command handler: the game menu's settings and tools entries.

use std::io::Write;

use klondike_engine::engine::Engine;

use super::{clock_for, load_config};
use crate::cli::SettingsAction;
use crate::error::CliError;
use crate::store::FileStore;

/// Apply one settings change to the saved game and save it again.
pub fn handle_settings_command(
    action: SettingsAction,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let config = load_config(err)?;
    let mut store = FileStore::new(&config.save_dir);
    let clock = clock_for(config.seed);
    let mut engine = Engine::load_or_deal(&store, config.settings(), clock.as_ref());

    match action {
        SettingsAction::Draw => engine.toggle_draw_mode(),
        SettingsAction::Flips => engine.cycle_flip_limit(),
        SettingsAction::Score => engine.cycle_score_visibility(),
        SettingsAction::ResetScore => engine.reset_score(),
    }
    engine.save(&mut store)?;

    let settings = engine.state().settings();
    match action {
        SettingsAction::Draw => writeln!(out, "draw: {}", settings.draw.as_str())?,
        SettingsAction::Flips => writeln!(out, "flips: {}", settings.flip_limit.as_str())?,
        SettingsAction::Score => writeln!(out, "score: {}", settings.score.as_str())?,
        SettingsAction::ResetScore => writeln!(out, "score: {}", engine.state().score())?,
    }
    Ok(())
}
