//! Fixed 82-byte save format.
//!
//! ```text
//! offset  bytes  field
//! 0       1      stock_count
//! 1       1      talon
//! 2       4      foundation tops (255 = empty)
//! 6       7      tableau_count
//! 13      7      hidden_count
//! 20      <=52   stock cards, then each tableau pile bottom to top
//! 72      1      win
//! 73      1      draw setting
//! 74      1      flip limit setting
//! 75      1      score visibility setting
//! 76      1      flips
//! 77      1      talon_showing
//! 78      4      score, i32 little-endian
//! ```
//!
//! Existing saves depend on this layout byte for byte.

use std::collections::{HashMap, HashSet};

use crate::cards::{Card, Rank, Suit, DECK_SIZE};
use crate::cursor::select_talon;
use crate::errors::{GameError, PersistError, StoreError};
use crate::game::{Cursor, GameState};
use crate::piles::{
    Foundations, Stock, TableauPile, FOUNDATION_PILES, STOCK_CAPACITY, TABLEAU_CAPACITY,
    TABLEAU_PILES,
};
use crate::settings::{DrawMode, FlipLimit, ScoreVisibility, Settings};

/// Store key the game is saved under.
pub const STATE_KEY: u32 = 0;
/// Size of a saved game.
pub const STATE_LEN: usize = 82;

const STOCK_COUNT: usize = 0;
const TALON: usize = 1;
const FOUNDATIONS: usize = 2;
const TABLEAU_COUNTS: usize = 6;
const HIDDEN_COUNTS: usize = 13;
const CARDS: usize = 20;
const WIN: usize = 72;
const DRAW: usize = 73;
const FLIP_LIMIT: usize = 74;
const SCORE_VISIBILITY: usize = 75;
const FLIPS: usize = 76;
const TALON_SHOWING: usize = 77;
const SCORE: usize = 78;
const EMPTY_FOUNDATION: u8 = 255;

/// Byte store owned by the host platform.
pub trait PersistentStore {
    /// Up to `len` bytes stored under `key`, or `None` if the key is absent.
    fn read(&self, key: u32, len: usize) -> Option<Vec<u8>>;
    fn write(&mut self, key: u32, bytes: &[u8]) -> Result<(), StoreError>;
}

/// In-memory store, for tests and hosts without persistence.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<u32, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentStore for MemoryStore {
    fn read(&self, key: u32, len: usize) -> Option<Vec<u8>> {
        self.entries
            .get(&key)
            .map(|bytes| bytes[..bytes.len().min(len)].to_vec())
    }

    fn write(&mut self, key: u32, bytes: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(key, bytes.to_vec());
        Ok(())
    }
}

/// Serialize the whole game. Fails only if the state breaks the pile invariants.
pub fn encode(state: &GameState) -> Result<[u8; STATE_LEN], GameError> {
    let mut buf = [0u8; STATE_LEN];
    let stock = state.stock();
    buf[STOCK_COUNT] = stock.len() as u8;
    buf[TALON] = stock.talon() as u8;
    for (slot, top) in state.foundations().tops().iter().enumerate() {
        buf[FOUNDATIONS + slot] = top.map_or(EMPTY_FOUNDATION, Card::value);
    }
    for (i, pile) in state.tableau().iter().enumerate() {
        buf[TABLEAU_COUNTS + i] = pile.len() as u8;
        buf[HIDDEN_COUNTS + i] = pile.hidden_count() as u8;
    }
    let mut at = CARDS;
    for card in state.loose_cards() {
        if at >= WIN {
            return Err(GameError::PileOverflow {
                pile: "saved card area",
                capacity: DECK_SIZE,
            });
        }
        buf[at] = card.value();
        at += 1;
    }
    let settings = state.settings();
    buf[WIN] = u8::from(state.is_won());
    buf[DRAW] = settings.draw.to_byte();
    buf[FLIP_LIMIT] = settings.flip_limit.to_byte();
    buf[SCORE_VISIBILITY] = settings.score.to_byte();
    buf[FLIPS] = state.flips();
    buf[TALON_SHOWING] = stock.showing() as u8;
    buf[SCORE..SCORE + 4].copy_from_slice(&state.score().to_le_bytes());
    Ok(buf)
}

fn card_at(buf: &[u8], at: usize) -> Result<Card, PersistError> {
    Card::from_value(buf[at])
        .ok_or_else(|| PersistError::Corrupt(format!("card value {} at offset {}", buf[at], at)))
}

/// Rebuild a game from a saved buffer. Only the first [`STATE_LEN`] bytes are read.
///
/// The cursor is left at its default; [`load_state`] re-homes it.
pub fn decode(buf: &[u8]) -> Result<GameState, PersistError> {
    if buf.len() < STATE_LEN {
        return Err(PersistError::Truncated {
            expected: STATE_LEN,
            actual: buf.len(),
        });
    }
    let settings = Settings {
        draw: DrawMode::from_byte(buf[DRAW])
            .ok_or_else(|| PersistError::Corrupt(format!("draw setting {}", buf[DRAW])))?,
        flip_limit: FlipLimit::from_byte(buf[FLIP_LIMIT])
            .ok_or_else(|| PersistError::Corrupt(format!("flip limit {}", buf[FLIP_LIMIT])))?,
        score: ScoreVisibility::from_byte(buf[SCORE_VISIBILITY]).ok_or_else(|| {
            PersistError::Corrupt(format!("score setting {}", buf[SCORE_VISIBILITY]))
        })?,
    };

    let stock_count = usize::from(buf[STOCK_COUNT]);
    if stock_count > STOCK_CAPACITY {
        return Err(PersistError::Corrupt(format!("stock count {}", stock_count)));
    }
    let counts = &buf[TABLEAU_COUNTS..TABLEAU_COUNTS + TABLEAU_PILES];
    let hidden = &buf[HIDDEN_COUNTS..HIDDEN_COUNTS + TABLEAU_PILES];
    if counts.iter().any(|&c| usize::from(c) > TABLEAU_CAPACITY) {
        return Err(PersistError::Corrupt("tableau count".to_string()));
    }
    let total = stock_count + counts.iter().map(|&c| usize::from(c)).sum::<usize>();
    if CARDS + total > WIN {
        return Err(PersistError::Corrupt(format!("{} cards in play", total)));
    }

    let mut at = CARDS;
    let mut stock_cards = Vec::with_capacity(stock_count);
    for _ in 0..stock_count {
        stock_cards.push(card_at(buf, at)?);
        at += 1;
    }
    let stock = Stock::from_parts(
        stock_cards,
        usize::from(buf[TALON]),
        usize::from(buf[TALON_SHOWING]),
    )?;

    let mut tableau: [TableauPile; TABLEAU_PILES] = Default::default();
    for (i, pile) in tableau.iter_mut().enumerate() {
        let mut cards = Vec::with_capacity(usize::from(counts[i]));
        for _ in 0..counts[i] {
            cards.push(card_at(buf, at)?);
            at += 1;
        }
        *pile = TableauPile::from_parts(cards, usize::from(hidden[i]))?;
    }

    let mut tops = [None; FOUNDATION_PILES];
    for (slot, top) in tops.iter_mut().enumerate() {
        let b = buf[FOUNDATIONS + slot];
        if b != EMPTY_FOUNDATION {
            *top = Some(card_at(buf, FOUNDATIONS + slot)?);
        }
    }

    let mut score = [0u8; 4];
    score.copy_from_slice(&buf[SCORE..SCORE + 4]);

    let state = GameState {
        stock,
        foundations: Foundations::from_tops(tops),
        tableau,
        settings,
        score: i32::from_le_bytes(score),
        win: buf[WIN] != 0,
        flips: buf[FLIPS],
        cursor: Cursor::default(),
    };
    check_conservation(&state)?;
    Ok(state)
}

/// Every card appears exactly once across stock, tableau and foundation runs.
fn check_conservation(state: &GameState) -> Result<(), PersistError> {
    let mut seen = HashSet::with_capacity(DECK_SIZE);
    for card in state.loose_cards() {
        if !seen.insert(card) {
            return Err(PersistError::Corrupt(format!("duplicate card {}", card)));
        }
    }
    for top in state.foundations().tops().iter().flatten() {
        for rank in 0..=top.rank() as u8 {
            let Some(rank) = Rank::from_u8(rank) else {
                continue;
            };
            let card = Card::new(rank, top.suit());
            if !seen.insert(card) {
                return Err(PersistError::Corrupt(format!("duplicate card {}", card)));
            }
        }
    }
    let suits: HashSet<Suit> = state.foundations().tops().iter().flatten().map(|c| c.suit()).collect();
    if suits.len() != state.foundations().tops().iter().flatten().count() {
        return Err(PersistError::Corrupt("two foundations share a suit".to_string()));
    }
    if seen.len() != DECK_SIZE {
        return Err(PersistError::Corrupt(format!("{} of 52 cards", seen.len())));
    }
    Ok(())
}

pub fn save_state(state: &GameState, store: &mut dyn PersistentStore) -> Result<(), PersistError> {
    let buf = encode(state)?;
    store.write(STATE_KEY, &buf)?;
    tracing::info!(score = state.score(), "game saved");
    Ok(())
}

/// Read and decode the saved game, then put the cursor back on the talon.
pub fn load_state(store: &dyn PersistentStore) -> Result<GameState, PersistError> {
    let buf = store.read(STATE_KEY, STATE_LEN).ok_or(PersistError::NotFound)?;
    let mut state = decode(&buf)?;
    select_talon(&mut state);
    tracing::info!(score = state.score(), win = state.is_won(), "game loaded");
    Ok(state)
}
