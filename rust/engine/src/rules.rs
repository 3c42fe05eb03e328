//! Move legality. Nothing here mutates the game; an illegal move is simply `false`
//! or `None`.

use crate::cards::{Card, Rank};
use crate::game::{GameState, PileId};
use crate::piles::FOUNDATION_PILES;

/// The card a move from `source` would take: the top tableau card or the playable
/// talon card. Foundations are never a source.
pub fn source_card(state: &GameState, source: PileId) -> Option<Card> {
    match source {
        PileId::Talon => state.stock.top(),
        PileId::Tableau(i) => state.tableau.get(i).and_then(|p| p.top()),
        PileId::Foundations => None,
    }
}

/// Whether `card` may be placed on tableau pile `dest`.
///
/// A non-empty pile takes the next lower rank in the opposite color. An empty pile
/// takes only a King, and only when `king_allowed_on_empty` is set.
pub fn tableau_rules_met(
    state: &GameState,
    dest: usize,
    card: Card,
    king_allowed_on_empty: bool,
) -> bool {
    let Some(pile) = state.tableau.get(dest) else {
        return false;
    };
    match pile.top() {
        Some(top) => {
            let met = card.rank() as u8 + 1 == top.rank() as u8 && card.is_red() != top.is_red();
            tracing::trace!(dest, card = card.value(), top = top.value(), met, "tableau rules");
            met
        }
        None => card.rank() == Rank::King && king_allowed_on_empty,
    }
}

/// Move only the source's top card onto tableau pile `dest`.
pub fn can_move_single_card_to_tableau(state: &GameState, source: PileId, dest: usize) -> bool {
    if source == PileId::Tableau(dest) {
        return false;
    }
    match source_card(state, source) {
        Some(card) => tableau_rules_met(state, dest, card, true),
        None => false,
    }
}

/// Move a tableau pile's whole face-up run onto tableau pile `dest`.
///
/// Needs at least two face-up cards. A King-based run may go to an empty pile only
/// when it sat on hidden cards, so that the move uncovers something.
pub fn can_move_pile_to_tableau(state: &GameState, source: PileId, dest: usize) -> bool {
    let PileId::Tableau(src) = source else {
        return false;
    };
    if src == dest {
        return false;
    }
    let Some(pile) = state.tableau.get(src) else {
        return false;
    };
    if !pile.multiple_cards_showing() {
        return false;
    }
    match pile.base() {
        Some(base) => tableau_rules_met(state, dest, base, pile.hidden_count() > 0),
        None => false,
    }
}

pub fn can_move_to_tableau(state: &GameState, source: PileId, dest: usize) -> bool {
    can_move_single_card_to_tableau(state, source, dest)
        || can_move_pile_to_tableau(state, source, dest)
}

/// First foundation slot that takes the source card.
///
/// Slots are scanned left to right: an empty slot takes an Ace, an occupied slot takes
/// the same suit one rank up. `None` when no slot qualifies.
pub fn can_move_to_foundations(state: &GameState, source: PileId) -> Option<usize> {
    let card = source_card(state, source)?;
    (0..FOUNDATION_PILES).find(|&slot| match state.foundations.top(slot) {
        None => card.rank() == Rank::Ace,
        Some(top) => top.suit() == card.suit() && top.rank() as u8 + 1 == card.rank() as u8,
    })
}

/// A pile is a usable source if its card can go to the foundations or some tableau
/// pile. The talon is always selectable since drawing happens there.
pub fn source_pile_is_valid(state: &GameState, selection: PileId) -> bool {
    if selection == PileId::Talon {
        return true;
    }
    if can_move_to_foundations(state, selection).is_some() {
        return true;
    }
    (0..state.tableau.len()).any(|dest| can_move_to_tableau(state, selection, dest))
}

/// Whether `selection` can receive a move from `source`.
pub fn destination_pile_is_valid(state: &GameState, source: PileId, selection: PileId) -> bool {
    match selection {
        PileId::Foundations => can_move_to_foundations(state, source).is_some(),
        PileId::Tableau(dest) => can_move_to_tableau(state, source, dest),
        PileId::Talon => false,
    }
}
