//! # Play Command
//!
//! Interactive Klondike on a line-oriented terminal. Each input line is one button
//! press of the four-button device, plus a few menu entries:
//!
//! | input          | action                                   |
//! |----------------|------------------------------------------|
//! | `u`, `up`      | select the next pile                     |
//! | `s`, `select`  | begin or complete a move                 |
//! | `d`, `down`    | draw from the stock, or abort a move     |
//! | `a`, `auto`    | sweep tableau cards to the foundations   |
//! | `n`, `new`     | re-deal (costs 52)                       |
//! | `h`, `help`    | show the controls                        |
//! | `q`, `quit`    | save and exit                            |
//!
//! The game is saved on quit and at end of input.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use klondike_engine::engine::{Command, Engine};
use klondike_engine::persist::{self, STATE_KEY};

use super::{clock_for, load_config};
use crate::error::CliError;
use crate::formatters::render_board;
use crate::io_utils::read_stdin_line;
use crate::store::FileStore;
use crate::ui;

pub const HELP_TEXT: &str = "\
Controls
  u / up      select the next pile
  s / select  begin a move from the selected pile, or finish it on the selected pile
  d / down    turn over stock cards, or abort the move in progress
  a / auto    move every playable tableau card to the foundations
  n / new     deal a new game (costs 52)
  h / help    show this text
  q / quit    save and exit

Gameplay
  A move takes the top card of a pile, or its whole face-up run; part of a run
  cannot be moved.
  An empty pile takes only a King.
  Cards on the foundations stay there.
";

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    New,
    Help,
    Quit,
}

pub fn parse_input(line: &str) -> Option<Input> {
    let input = match line.trim().to_ascii_lowercase().as_str() {
        "u" | "up" => Input::Command(Command::Advance),
        "s" | "select" => Input::Command(Command::Select),
        "d" | "down" => Input::Command(Command::DrawOrCancel),
        "a" | "auto" => Input::Command(Command::AutoSweep),
        "n" | "new" => Input::New,
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        _ => return None,
    };
    Some(input)
}

/// Handle the play command: load or deal, then run input lines until quit or EOF.
///
/// `seed` applies to newly dealt games only; a resumed game keeps its layout.
pub fn handle_play_command(
    seed: Option<u32>,
    new: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let config = load_config(err)?;
    let mut store = FileStore::new(&config.save_dir);
    let clock = clock_for(seed.or(config.seed));

    if seed.is_some() && !new && persist::load_state(&store).is_ok() {
        ui::display_warning(err, "--seed only applies to a new game; pass --new to deal one")?;
    }
    let mut engine = if new {
        Engine::new_game(config.settings(), clock.as_ref())
    } else {
        Engine::load_or_deal(&store, config.settings(), clock.as_ref())
    };
    let won = Arc::new(AtomicBool::new(false));
    let alert = Arc::clone(&won);
    engine.on_win(move || alert.store(true, Ordering::SeqCst));

    render_board(&engine.view(), out)?;
    while let Some(line) = read_stdin_line(stdin) {
        if line.is_empty() {
            continue;
        }
        match parse_input(&line) {
            Some(Input::Command(command)) => {
                if engine.apply(command) {
                    render_board(&engine.view(), out)?;
                }
                if won.swap(false, Ordering::SeqCst) {
                    writeln!(out, "All four foundations are complete. Type n to deal again.")?;
                }
            }
            Some(Input::New) => {
                engine.redeal(clock.as_ref());
                render_board(&engine.view(), out)?;
            }
            Some(Input::Help) => write!(out, "{}", HELP_TEXT)?,
            Some(Input::Quit) => break,
            None => ui::warn_unknown_input(err, &line)?,
        }
    }

    engine.save(&mut store)?;
    writeln!(out, "Saved to {}", store.path_for(STATE_KEY).display())?;
    Ok(())
}
