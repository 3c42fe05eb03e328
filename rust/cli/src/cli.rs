//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use klondike_engine::settings::DrawMode;

#[derive(Parser, Debug)]
#[command(
    name = "klondike",
    version,
    about = "Klondike Solitaire driven by four buttons"
)]
pub struct KlondikeCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play the saved game, reading one command per input line
    Play {
        /// Seed for a newly dealt game
        #[arg(long)]
        seed: Option<u32>,
        /// Discard the saved game and deal a new one
        #[arg(long)]
        new: bool,
    },
    /// Deal a game and print the board without touching the save
    Deal {
        #[arg(long)]
        seed: Option<u32>,
        #[arg(long, value_enum)]
        draw: Option<DrawArg>,
    },
    /// Print the saved game
    Show {
        /// Emit the board snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change one setting of the saved game
    Settings {
        #[arg(value_enum)]
        action: SettingsAction,
    },
    /// Display the resolved configuration with value sources
    Cfg,
}

/// Draw mode as accepted on the command line.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum DrawArg {
    One,
    Three,
}

impl From<DrawArg> for DrawMode {
    fn from(arg: DrawArg) -> Self {
        match arg {
            DrawArg::One => DrawMode::One,
            DrawArg::Three => DrawMode::Three,
        }
    }
}

/// The settings menu entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SettingsAction {
    /// Toggle between draw one and draw three
    Draw,
    /// Cycle the flip limit: none, zero, one, three
    Flips,
    /// Show or hide the score
    Score,
    /// Set the running score back to zero
    ResetScore,
}
