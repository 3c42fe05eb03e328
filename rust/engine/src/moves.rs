//! Move execution. Each function re-checks legality and leaves the state untouched
//! when the move is not allowed.

use crate::cards::Card;
use crate::game::{GameState, PileId, FOUNDATION_REWARD};
use crate::rules::{can_move_pile_to_tableau, can_move_single_card_to_tableau, can_move_to_foundations, source_card};
use crate::settings::DrawMode;

/// Pop the source card from its pile. Taking the top of a tableau pile turns over the
/// hidden card beneath it.
pub fn remove_source_card(state: &mut GameState, source: PileId) -> Option<Card> {
    match source {
        PileId::Talon => state.stock.take_top(),
        PileId::Tableau(i) => state.tableau.get_mut(i).and_then(|p| p.pop()),
        PileId::Foundations => None,
    }
}

/// Move the source's top card, or failing that its whole face-up run, onto tableau
/// pile `dest`. Returns whether anything moved.
pub fn move_to_tableau(state: &mut GameState, source: PileId, dest: usize) -> bool {
    if can_move_single_card_to_tableau(state, source, dest) {
        let Some(card) = source_card(state, source) else {
            return false;
        };
        // a full destination leaves the source untouched
        if state.tableau[dest].push(card).is_err() {
            tracing::warn!(dest, "tableau pile full, move dropped");
            return false;
        }
        remove_source_card(state, source);
        tracing::debug!(source = source.index(), dest, card = card.value(), "moved card to tableau");
        true
    } else if can_move_pile_to_tableau(state, source, dest) {
        let PileId::Tableau(src) = source else {
            return false;
        };
        let run_len = state.tableau[src].face_up().len();
        if state.tableau[dest].len() + run_len > crate::piles::TABLEAU_CAPACITY {
            tracing::warn!(dest, run_len, "tableau pile full, move dropped");
            return false;
        }
        let run = state.tableau[src].take_face_up();
        for card in run {
            // capacity checked above
            let _ = state.tableau[dest].push(card);
        }
        tracing::debug!(src, dest, run_len, "moved run to tableau");
        true
    } else {
        false
    }
}

/// Move the source card to the first foundation slot that takes it, scoring
/// [`FOUNDATION_REWARD`]. Sets `win` once every slot shows a King.
pub fn move_to_foundation(state: &mut GameState, source: PileId) -> bool {
    let Some(slot) = can_move_to_foundations(state, source) else {
        return false;
    };
    let Some(card) = remove_source_card(state, source) else {
        return false;
    };
    state.foundations.place(slot, card);
    state.score = state.score.saturating_add(FOUNDATION_REWARD);
    tracing::debug!(source = source.index(), slot, card = card.value(), "moved card to foundation");
    if state.foundations.complete() {
        state.win = true;
        tracing::info!(score = state.score, "all foundations complete");
    }
    true
}

/// Sweep tableau cards to the foundations, left to right, repeating whole passes
/// until a pass moves nothing.
///
/// Returns the number of cards moved.
pub fn auto_move_to_foundations(state: &mut GameState) -> usize {
    let mut moved = 0;
    loop {
        let mut success = false;
        for i in 0..state.tableau.len() {
            if !state.tableau[i].is_empty() && move_to_foundation(state, PileId::Tableau(i)) {
                success = true;
                moved += 1;
            }
        }
        if !success {
            break;
        }
    }
    moved
}

/// Turn over the next stock card(s) into the talon window.
///
/// When the window already reaches the end of the stock this is a re-deal, allowed
/// only while the flip limit permits. Returns whether the talon changed.
pub fn deal_card_from_stock(state: &mut GameState) -> bool {
    if !state.stock.can_draw() {
        return false;
    }
    let before = (state.stock.talon(), state.stock.showing());
    if state.stock.window_at_end() {
        if !state.settings.flip_limit.allows(state.flips) {
            tracing::debug!(flips = state.flips, "re-deal refused by flip limit");
            return false;
        }
        state.stock.restart();
        state.flips = state.flips.saturating_add(1);
        tracing::debug!(flips = state.flips, "talon turned back into stock");
    } else {
        state.stock.advance();
    }
    if state.settings.draw == DrawMode::Three {
        state.stock.open_window(DrawMode::Three.extra_showing());
    }
    tracing::trace!(talon = state.stock.talon(), showing = state.stock.showing(), "drew from stock");
    before != (state.stock.talon(), state.stock.showing())
}
