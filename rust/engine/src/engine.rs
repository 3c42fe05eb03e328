use std::fmt;

use crate::cursor::{select_next_valid_pile, select_talon, select_valid_pile};
use crate::errors::PersistError;
use crate::game::{Cursor, GameState, PileId};
use crate::moves::{auto_move_to_foundations, deal_card_from_stock, move_to_foundation, move_to_tableau};
use crate::persist::{self, PersistentStore};
use crate::rules::source_pile_is_valid;
use crate::settings::{DrawMode, Settings};
use crate::view::BoardView;

/// Source of the shuffle seed for a new deal.
pub trait Clock {
    fn seed(&self) -> u32;
}

/// Seeds from the current UNIX time, truncated to 32 bits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn seed(&self) -> u32 {
        chrono::Utc::now().timestamp() as u32
    }
}

/// Always yields the same seed; for tests and `--seed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn seed(&self) -> u32 {
        self.0
    }
}

/// The four abstract commands an input device can issue.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    /// Move the cursor to the next valid pile ("up")
    Advance,
    /// Begin a move from the selected pile, or complete it onto the selected pile
    Select,
    /// Draw from the stock, or abort a move in progress (short "down")
    DrawOrCancel,
    /// Sweep every eligible tableau card to the foundations (long "down")
    AutoSweep,
}

type WinAlert = Box<dyn FnMut() + Send>;

/// Owns one game and runs commands against it.
///
/// # Examples
///
/// ```
/// use klondike_engine::engine::{Command, Engine, FixedClock};
/// use klondike_engine::settings::Settings;
///
/// let mut engine = Engine::new_game(Settings::default(), &FixedClock(1));
/// assert_eq!(engine.state().score(), -52);
///
/// // Drawing from a fresh stock always changes the talon
/// assert!(engine.apply(Command::DrawOrCancel));
/// assert_eq!(engine.state().stock().talon(), 1);
/// ```
pub struct Engine {
    /// The single game aggregate every command mutates
    state: GameState,
    /// Fired once when the last King reaches a foundation
    on_win: Option<WinAlert>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("on_win", &self.on_win.is_some())
            .finish()
    }
}

impl Engine {
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            on_win: None,
        }
    }

    /// Start from a zero score and deal.
    pub fn new_game(settings: Settings, clock: &dyn Clock) -> Self {
        let mut state = GameState::new(settings, 0);
        state.shuffle_and_deal(clock.seed());
        Self::from_state(state)
    }

    /// Resume the saved game, or deal a new one with `settings` if there is no usable
    /// save.
    pub fn load_or_deal(store: &dyn PersistentStore, settings: Settings, clock: &dyn Clock) -> Self {
        match persist::load_state(store) {
            Ok(state) => Self::from_state(state),
            Err(PersistError::NotFound) => {
                tracing::info!("no saved game, dealing");
                Self::new_game(settings, clock)
            }
            Err(e) => {
                tracing::warn!(error = %e, "saved game rejected, dealing");
                Self::new_game(settings, clock)
            }
        }
    }

    pub fn save(&self, store: &mut dyn PersistentStore) -> Result<(), PersistError> {
        persist::save_state(&self.state, store)
    }

    /// Register the alert fired when the game is won.
    pub fn on_win<F>(&mut self, alert: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_win = Some(Box::new(alert));
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn view(&self) -> BoardView {
        BoardView::from_state(&self.state)
    }

    /// Run one command. Returns whether anything observable changed, cursor included.
    /// Every command is a no-op once the game is won.
    pub fn apply(&mut self, command: Command) -> bool {
        if self.state.win {
            return false;
        }
        let before = self.state.clone();
        match command {
            Command::Advance => select_next_valid_pile(&mut self.state),
            Command::Select => begin_or_complete_move(&mut self.state),
            Command::DrawOrCancel => draw_or_cancel(&mut self.state),
            Command::AutoSweep => auto_sweep(&mut self.state),
        }
        if self.state.win {
            tracing::info!(score = self.state.score, "game won");
            if let Some(alert) = self.on_win.as_mut() {
                alert();
            }
        }
        before != self.state
    }

    /// Throw away the current layout and deal again, keeping the running score.
    pub fn redeal(&mut self, clock: &dyn Clock) {
        self.state.shuffle_and_deal(clock.seed());
    }

    /// Switch between draw-one and draw-three, re-opening the talon window to match.
    pub fn toggle_draw_mode(&mut self) {
        let draw = self.state.settings.draw.toggled();
        self.state.settings.draw = draw;
        match draw {
            DrawMode::Three => self.state.stock.open_window(draw.extra_showing()),
            DrawMode::One => self.state.stock.close_window(),
        }
    }

    pub fn cycle_flip_limit(&mut self) {
        self.state.settings.flip_limit = self.state.settings.flip_limit.next();
    }

    pub fn cycle_score_visibility(&mut self) {
        self.state.settings.score = self.state.settings.score.next();
    }

    pub fn reset_score(&mut self) {
        self.state.score = 0;
    }
}

fn begin_or_complete_move(state: &mut GameState) {
    match state.cursor {
        Cursor::SelectingSource { selection } => {
            if source_pile_is_valid(state, selection) {
                state.cursor = Cursor::SelectingDestination {
                    source: selection,
                    selection: PileId::Foundations,
                };
                select_valid_pile(state);
            }
        }
        Cursor::SelectingDestination { source, selection } => match selection {
            PileId::Foundations => {
                move_to_foundation(state, source);
                state.cursor = Cursor::SelectingSource { selection };
                select_talon(state);
            }
            PileId::Tableau(dest) => {
                move_to_tableau(state, source, dest);
                state.cursor = Cursor::SelectingSource { selection };
                select_valid_pile(state);
            }
            PileId::Talon => {
                state.cursor = Cursor::SelectingSource { selection };
                select_valid_pile(state);
            }
        },
    }
}

fn draw_or_cancel(state: &mut GameState) {
    if let Cursor::SelectingSource { .. } = state.cursor {
        deal_card_from_stock(state);
    }
    select_talon(state);
}

fn auto_sweep(state: &mut GameState) {
    let moved = auto_move_to_foundations(state);
    tracing::debug!(moved, "auto sweep");
    state.cursor = Cursor::SelectingSource {
        selection: state.cursor.selection(),
    };
    select_valid_pile(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::piles::{Foundations, Stock, TableauPile};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn near_win() -> GameState {
        let mut g = GameState::new(Settings::default(), 0);
        g.foundations = Foundations::from_tops([
            Some(card(Rank::King, Suit::Spades)),
            Some(card(Rank::King, Suit::Clubs)),
            Some(card(Rank::Queen, Suit::Hearts)),
            Some(card(Rank::King, Suit::Diamonds)),
        ]);
        g.tableau[0] = TableauPile::from_parts(vec![card(Rank::King, Suit::Hearts)], 0).unwrap();
        g.stock = Stock::from_parts(Vec::new(), 0, 0).unwrap();
        g.cursor = Cursor::SelectingSource {
            selection: PileId::Tableau(0),
        };
        g
    }

    #[test]
    fn select_then_select_moves_to_foundation() {
        let mut engine = Engine::from_state(near_win());
        assert!(engine.apply(Command::Select));
        assert_eq!(
            engine.state().cursor(),
            Cursor::SelectingDestination {
                source: PileId::Tableau(0),
                selection: PileId::Foundations
            }
        );
        assert!(engine.apply(Command::Select));
        assert!(engine.state().is_won());
        assert_eq!(engine.state().score(), 5);
    }

    #[test]
    fn win_alert_fires_once_and_commands_stop() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let mut engine = Engine::from_state(near_win());
        engine.on_win(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(engine.apply(Command::AutoSweep));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        for cmd in [
            Command::Advance,
            Command::Select,
            Command::DrawOrCancel,
            Command::AutoSweep,
        ] {
            assert!(!engine.apply(cmd));
        }
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn draw_or_cancel_aborts_destination_mode() {
        let mut engine = Engine::new_game(Settings::default(), &FixedClock(3));
        engine.state.cursor = Cursor::SelectingDestination {
            source: PileId::Talon,
            selection: PileId::Foundations,
        };
        let talon = engine.state().stock().talon();
        engine.apply(Command::DrawOrCancel);
        assert_eq!(engine.state().stock().talon(), talon);
        assert_eq!(engine.state().cursor().selection(), PileId::Talon);
    }

    #[test]
    fn toggle_draw_mode_reopens_window() {
        let mut engine = Engine::new_game(Settings::default(), &FixedClock(9));
        assert_eq!(engine.state().stock().showing(), 0);
        engine.toggle_draw_mode();
        assert_eq!(engine.state().settings().draw, DrawMode::Three);
        assert_eq!(engine.state().stock().showing(), 2);
        engine.toggle_draw_mode();
        assert_eq!(engine.state().stock().showing(), 0);
    }

    #[test]
    fn redeal_keeps_running_score() {
        let mut engine = Engine::new_game(Settings::default(), &FixedClock(9));
        engine.redeal(&FixedClock(10));
        assert_eq!(engine.state().score(), -104);
        engine.reset_score();
        assert_eq!(engine.state().score(), 0);
    }
}
