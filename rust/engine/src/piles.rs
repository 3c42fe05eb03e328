use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

pub const TABLEAU_PILES: usize = 7;
pub const FOUNDATION_PILES: usize = 4;
/// Six hidden cards plus a King-to-Ace run.
pub const TABLEAU_CAPACITY: usize = 19;
pub const STOCK_CAPACITY: usize = 24;

/// One of the seven tableau piles, bottom card first.
/// The lowest `hidden` cards are face down; the rest form the face-up run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableauPile {
    cards: Vec<Card>,
    hidden: usize,
}

impl TableauPile {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(TABLEAU_CAPACITY),
            hidden: 0,
        }
    }

    /// Build a pile from raw parts, checking `hidden <= len <= TABLEAU_CAPACITY`.
    ///
    /// A non-empty pile always shows its top card, so a fully hidden pile comes back
    /// with the top card turned over.
    pub fn from_parts(cards: Vec<Card>, hidden: usize) -> Result<Self, GameError> {
        if cards.len() > TABLEAU_CAPACITY {
            return Err(GameError::PileOverflow {
                pile: "tableau pile",
                capacity: TABLEAU_CAPACITY,
            });
        }
        if hidden > cards.len() {
            return Err(GameError::PileOverflow {
                pile: "hidden run",
                capacity: cards.len(),
            });
        }
        let hidden = hidden.min(cards.len().saturating_sub(1));
        Ok(Self { cards, hidden })
    }

    /// A freshly dealt pile: every card but the last face down.
    pub(crate) fn dealt(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
            hidden: cards.len().saturating_sub(1),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
    pub fn hidden_count(&self) -> usize {
        self.hidden
    }
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
    pub fn face_up(&self) -> &[Card] {
        &self.cards[self.hidden..]
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Bottom card of the face-up run.
    pub fn base(&self) -> Option<Card> {
        self.cards.get(self.hidden).copied()
    }

    pub fn multiple_cards_showing(&self) -> bool {
        self.face_up().len() > 1
    }

    pub fn push(&mut self, card: Card) -> Result<(), GameError> {
        if self.cards.len() >= TABLEAU_CAPACITY {
            return Err(GameError::PileOverflow {
                pile: "tableau pile",
                capacity: TABLEAU_CAPACITY,
            });
        }
        self.cards.push(card);
        Ok(())
    }

    /// Remove the top card, turning over the card beneath it if it was hidden.
    pub fn pop(&mut self) -> Option<Card> {
        let card = self.cards.pop();
        self.flip_top_card();
        card
    }

    /// Remove the whole face-up run, bottom card first.
    pub fn take_face_up(&mut self) -> Vec<Card> {
        let run = self.cards.split_off(self.hidden);
        self.flip_top_card();
        run
    }

    fn flip_top_card(&mut self) {
        if self.hidden > 0 && self.cards.len() <= self.hidden {
            self.hidden = self.cards.len().saturating_sub(1);
        }
    }
}

/// The stock with its talon window.
///
/// Cards before `talon` have been passed over, `stock[talon..=talon + showing]` is the
/// face-up window and the top of the window is the playable card. Cards after it are
/// still face down. Taking a card compacts the array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    cards: Vec<Card>,
    talon: usize,
    showing: usize,
}

impl Stock {
    /// A freshly dealt stock with the talon at the first card.
    pub(crate) fn dealt(cards: &[Card], showing: usize) -> Self {
        let mut stock = Self {
            cards: cards[..cards.len().min(STOCK_CAPACITY)].to_vec(),
            talon: 0,
            showing,
        };
        stock.clamp_window();
        stock
    }

    /// Build from raw parts, clamping the window into the live cards.
    pub fn from_parts(cards: Vec<Card>, talon: usize, showing: usize) -> Result<Self, GameError> {
        if cards.len() > STOCK_CAPACITY {
            return Err(GameError::PileOverflow {
                pile: "stock",
                capacity: STOCK_CAPACITY,
            });
        }
        let mut stock = Self {
            cards,
            talon,
            showing,
        };
        stock.clamp_window();
        Ok(stock)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
    pub fn talon(&self) -> usize {
        self.talon
    }
    pub fn showing(&self) -> usize {
        self.showing
    }

    /// The playable card at the top of the talon window.
    pub fn top(&self) -> Option<Card> {
        if self.cards.len() < self.showing + 1 {
            return None;
        }
        self.cards.get(self.talon + self.showing).copied()
    }

    /// Face-up window cards, left to right.
    pub fn window(&self) -> &[Card] {
        if self.cards.is_empty() {
            return &[];
        }
        let end = (self.talon + self.showing + 1).min(self.cards.len());
        &self.cards[self.talon.min(end)..end]
    }

    /// The window already ends at the last card; the next draw is a re-deal.
    pub fn window_at_end(&self) -> bool {
        self.talon + self.showing + 1 == self.cards.len()
    }

    /// Undrawn face-down cards remain beyond the window.
    pub fn has_undrawn(&self) -> bool {
        self.talon + self.showing + 1 < self.cards.len()
    }

    /// Take the playable card.
    ///
    /// Past the first card the window shrinks, then the talon cursor steps back. At
    /// `talon == 0` the window keeps its width and the next stock card slides in.
    pub fn take_top(&mut self) -> Option<Card> {
        let idx = self.talon + self.showing;
        if self.cards.len() < self.showing + 1 || idx >= self.cards.len() {
            return None;
        }
        let card = self.cards.remove(idx);
        if self.talon > 0 {
            if self.showing > 0 {
                self.showing -= 1;
            } else {
                self.talon -= 1;
            }
        }
        self.clamp_window();
        Some(card)
    }

    pub(crate) fn can_draw(&self) -> bool {
        self.cards.len() > self.showing + 1
    }

    pub(crate) fn restart(&mut self) {
        self.talon = 0;
    }

    pub(crate) fn advance(&mut self) {
        self.talon += self.showing + 1;
    }

    /// Re-open the window to up to three cards (`max_extra` extra beyond the top).
    pub(crate) fn open_window(&mut self, max_extra: usize) {
        self.showing = self
            .cards
            .len()
            .saturating_sub(self.talon + 1)
            .min(max_extra);
    }

    pub(crate) fn close_window(&mut self) {
        self.showing = 0;
    }

    fn clamp_window(&mut self) {
        if self.cards.is_empty() {
            self.talon = 0;
            self.showing = 0;
            return;
        }
        let last = self.cards.len() - 1;
        self.talon = self.talon.min(last);
        self.showing = self.showing.min(last - self.talon);
    }
}

/// The four foundation slots, each holding only its top card.
/// A slot takes whichever suit's Ace lands on it first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foundations {
    tops: [Option<Card>; FOUNDATION_PILES],
}

impl Foundations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tops(tops: [Option<Card>; FOUNDATION_PILES]) -> Self {
        Self { tops }
    }

    pub fn tops(&self) -> &[Option<Card>; FOUNDATION_PILES] {
        &self.tops
    }

    pub fn top(&self, slot: usize) -> Option<Card> {
        self.tops.get(slot).copied().flatten()
    }

    /// Number of cards under all four tops; slots only ever hold Ace..top of one suit.
    pub fn card_count(&self) -> usize {
        self.tops
            .iter()
            .flatten()
            .map(|c| c.rank() as usize + 1)
            .sum()
    }

    /// Every slot shows a King.
    pub fn complete(&self) -> bool {
        self.tops.iter().all(|t| matches!(t, Some(c) if c.is_king()))
    }

    pub(crate) fn place(&mut self, slot: usize, card: Card) {
        if let Some(top) = self.tops.get_mut(slot) {
            *top = Some(card);
        }
    }
}
