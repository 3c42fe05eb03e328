use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::cursor;
use crate::deck::Deck;
use crate::piles::{Foundations, Stock, TableauPile, STOCK_CAPACITY, TABLEAU_PILES};
use crate::settings::Settings;

/// Score charged for every new deal.
pub const DEAL_COST: i32 = 52;
/// Score awarded for every card placed on a foundation.
pub const FOUNDATION_REWARD: i32 = 5;

/// A pile the selection cursor can point at.
///
/// Pile indices 0..=6 are the tableau, 7 the talon and 8 the four foundations taken
/// as one target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PileId {
    Tableau(usize),
    Talon,
    Foundations,
}

impl PileId {
    pub const TALON_INDEX: u8 = 7;
    pub const FOUNDATIONS_INDEX: u8 = 8;

    pub fn index(self) -> u8 {
        match self {
            PileId::Tableau(i) => i as u8,
            PileId::Talon => Self::TALON_INDEX,
            PileId::Foundations => Self::FOUNDATIONS_INDEX,
        }
    }

    pub fn from_index(i: u8) -> Option<Self> {
        match i {
            0..=6 => Some(PileId::Tableau(usize::from(i))),
            Self::TALON_INDEX => Some(PileId::Talon),
            Self::FOUNDATIONS_INDEX => Some(PileId::Foundations),
            _ => None,
        }
    }
}

/// Which half of a move the cursor is choosing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    SelectSource,
    SelectDestination,
}

/// The pile-selection cursor.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    /// Choosing a pile to move from
    SelectingSource { selection: PileId },
    /// `source` is captured; choosing where to put its card or run
    SelectingDestination { source: PileId, selection: PileId },
}

impl Cursor {
    pub fn selection(self) -> PileId {
        match self {
            Cursor::SelectingSource { selection } => selection,
            Cursor::SelectingDestination { selection, .. } => selection,
        }
    }

    pub fn source(self) -> Option<PileId> {
        match self {
            Cursor::SelectingSource { .. } => None,
            Cursor::SelectingDestination { source, .. } => Some(source),
        }
    }

    pub fn mode(self) -> Mode {
        match self {
            Cursor::SelectingSource { .. } => Mode::SelectSource,
            Cursor::SelectingDestination { .. } => Mode::SelectDestination,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::SelectingSource {
            selection: PileId::Talon,
        }
    }
}

/// Everything one game of Klondike owns: piles, settings, score and the cursor.
///
/// Created by a deal or a successful load and mutated in place by every command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    /// Stock array with the talon window
    pub(crate) stock: Stock,
    /// Top card of each foundation slot
    pub(crate) foundations: Foundations,
    /// The seven tableau piles, left to right
    pub(crate) tableau: [TableauPile; TABLEAU_PILES],
    pub(crate) settings: Settings,
    /// Running score across deals, may go negative
    pub(crate) score: i32,
    pub(crate) win: bool,
    /// Re-deals of the talon in this game
    pub(crate) flips: u8,
    pub(crate) cursor: Cursor,
}

impl GameState {
    pub fn new(settings: Settings, score: i32) -> Self {
        Self {
            settings,
            score,
            ..Self::default()
        }
    }

    pub fn stock(&self) -> &Stock {
        &self.stock
    }
    pub fn foundations(&self) -> &Foundations {
        &self.foundations
    }
    pub fn tableau(&self) -> &[TableauPile; TABLEAU_PILES] {
        &self.tableau
    }
    pub fn tableau_pile(&self, i: usize) -> Option<&TableauPile> {
        self.tableau.get(i)
    }
    pub fn settings(&self) -> Settings {
        self.settings
    }
    pub fn score(&self) -> i32 {
        self.score
    }
    pub fn is_won(&self) -> bool {
        self.win
    }
    pub fn flips(&self) -> u8 {
        self.flips
    }
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Shuffle a new deck with `seed` and lay out a fresh game.
    ///
    /// The first 24 cards form the stock, the remaining 28 go out triangularly so
    /// pile `i` gets `i + 1` cards with all but the last face down. Costs
    /// [`DEAL_COST`] and leaves the cursor on the talon.
    pub fn shuffle_and_deal(&mut self, seed: u32) {
        let deck = Deck::new_with_seed(seed);
        let cards = deck.cards();

        self.stock = Stock::dealt(
            &cards[..STOCK_CAPACITY],
            self.settings.draw.extra_showing(),
        );
        self.foundations = Foundations::new();
        let mut next = STOCK_CAPACITY;
        for (i, pile) in self.tableau.iter_mut().enumerate() {
            *pile = TableauPile::dealt(&cards[next..next + i + 1]);
            next += i + 1;
        }
        self.win = false;
        self.score = self.score.saturating_sub(DEAL_COST);
        self.flips = 0;
        tracing::info!(seed, score = self.score, "dealt new game");
        cursor::select_talon(self);
    }

    /// Every card currently on the board, foundations expanded to full runs.
    pub fn card_count(&self) -> usize {
        self.stock.len()
            + self.tableau.iter().map(TableauPile::len).sum::<usize>()
            + self.foundations.card_count()
    }

    /// All cards held in the stock and tableau, in storage order.
    pub fn loose_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.stock
            .cards()
            .iter()
            .chain(self.tableau.iter().flat_map(|p| p.cards().iter()))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pile_ids_round_trip_through_index() {
        for i in 0..=8u8 {
            assert_eq!(PileId::from_index(i).unwrap().index(), i);
        }
        assert_eq!(PileId::from_index(9), None);
    }

    #[test]
    fn deal_lays_out_triangle() {
        let mut g = GameState::new(Settings::default(), 0);
        g.shuffle_and_deal(1);
        assert_eq!(g.stock().len(), 24);
        for (i, pile) in g.tableau().iter().enumerate() {
            assert_eq!(pile.len(), i + 1);
            assert_eq!(pile.hidden_count(), i);
        }
        assert_eq!(g.score(), -DEAL_COST);
        let unique: HashSet<Card> = g.loose_cards().collect();
        assert_eq!(unique.len(), 52);
    }
}
