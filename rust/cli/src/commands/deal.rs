//! Deal command handler.
//!
//! Deals one game and prints the board. The save is never read or written, so the
//! same seed always prints the same board.

use std::io::Write;

use klondike_engine::engine::{Clock, Engine, FixedClock, SystemClock};
use klondike_engine::settings::DrawMode;

use super::load_config;
use crate::error::CliError;
use crate::formatters::render_board;

/// Handle the deal command.
///
/// `seed` falls back to the configured seed, then to the current time. The seed used
/// is printed first so the deal can be reproduced.
pub fn handle_deal_command(
    seed: Option<u32>,
    draw: Option<DrawMode>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let config = load_config(err)?;
    let mut settings = config.settings();
    if let Some(draw) = draw {
        settings.draw = draw;
    }
    let seed = seed.or(config.seed).unwrap_or_else(|| SystemClock.seed());
    let engine = Engine::new_game(settings, &FixedClock(seed));
    writeln!(out, "seed {}", seed)?;
    render_board(&engine.view(), out)?;
    Ok(())
}
