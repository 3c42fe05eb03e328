//! The pile-selection cursor.
//!
//! In source mode the cursor walks tableau piles 0..=6 and the talon; in destination
//! mode it walks tableau piles and the foundations group, falling back to source mode
//! when a full lap finds nowhere to go.

use crate::game::{Cursor, GameState, PileId};
use crate::piles::TABLEAU_PILES;
use crate::rules::{destination_pile_is_valid, source_pile_is_valid};

/// Put the cursor back on the talon in source mode.
///
/// With the stock used up the talon is pointless, so the first tableau pile with a
/// legal move is chosen instead, if any. Does nothing once the game is won.
pub fn select_talon(state: &mut GameState) {
    if state.win {
        return;
    }
    if state.stock.is_empty() {
        if let Some(i) =
            (0..TABLEAU_PILES).find(|&i| source_pile_is_valid(state, PileId::Tableau(i)))
        {
            state.cursor = Cursor::SelectingSource {
                selection: PileId::Tableau(i),
            };
            return;
        }
    }
    state.cursor = Cursor::SelectingSource {
        selection: PileId::Talon,
    };
}

/// Source-mode order: 0..=6 then the talon, wrapping.
fn next_source_index(index: u8) -> u8 {
    let next = index + 1;
    if next >= PileId::FOUNDATIONS_INDEX {
        0
    } else {
        next
    }
}

/// Destination-mode order: 0..=6 then the foundations, skipping the talon, wrapping.
fn next_destination_index(index: u8) -> u8 {
    let mut next = index + 1;
    if next == PileId::TALON_INDEX {
        next = PileId::FOUNDATIONS_INDEX;
    }
    if next > PileId::FOUNDATIONS_INDEX {
        next = 0;
    }
    next
}

/// Move the cursor to the next pile that is valid for the current mode.
pub fn select_next_valid_pile(state: &mut GameState) {
    match state.cursor {
        Cursor::SelectingSource { selection } => {
            let mut index = selection.index();
            loop {
                index = next_source_index(index);
                let Some(pile) = PileId::from_index(index) else {
                    continue;
                };
                if source_pile_is_valid(state, pile) {
                    state.cursor = Cursor::SelectingSource { selection: pile };
                    if pile == PileId::Talon {
                        select_talon(state);
                    }
                    return;
                }
            }
        }
        Cursor::SelectingDestination { source, selection } => {
            let mut index = selection.index();
            let mut first_visited: Option<u8> = None;
            loop {
                index = next_destination_index(index);
                match first_visited {
                    Some(first) if first == index => {
                        tracing::debug!(source = source.index(), "no destination, back to source");
                        state.cursor = Cursor::SelectingSource { selection };
                        select_talon(state);
                        return;
                    }
                    Some(_) => {}
                    None => first_visited = Some(index),
                }
                let Some(pile) = PileId::from_index(index) else {
                    continue;
                };
                if destination_pile_is_valid(state, source, pile) {
                    state.cursor = Cursor::SelectingDestination {
                        source,
                        selection: pile,
                    };
                    return;
                }
            }
        }
    }
}

/// Keep the current selection if it is still valid, otherwise advance.
pub fn select_valid_pile(state: &mut GameState) {
    let valid = match state.cursor {
        Cursor::SelectingSource { selection } => source_pile_is_valid(state, selection),
        Cursor::SelectingDestination { source, selection } => {
            destination_pile_is_valid(state, source, selection)
        }
    };
    if !valid {
        select_next_valid_pile(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::piles::{Stock, TableauPile};
    use crate::settings::Settings;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn stockless() -> GameState {
        let mut g = GameState::new(Settings::default(), 0);
        g.stock = Stock::from_parts(Vec::new(), 0, 0).unwrap();
        g
    }

    #[test]
    fn source_order_wraps_past_talon() {
        assert_eq!(next_source_index(6), 7);
        assert_eq!(next_source_index(7), 0);
        assert_eq!(next_source_index(8), 0);
    }

    #[test]
    fn destination_order_skips_talon() {
        assert_eq!(next_destination_index(6), 8);
        assert_eq!(next_destination_index(8), 0);
        assert_eq!(next_destination_index(7), 8);
    }

    #[test]
    fn select_talon_prefers_tableau_when_stock_empty() {
        let mut g = stockless();
        g.tableau[3] = TableauPile::from_parts(vec![card(Rank::Ace, Suit::Clubs)], 0).unwrap();
        select_talon(&mut g);
        assert_eq!(
            g.cursor,
            Cursor::SelectingSource {
                selection: PileId::Tableau(3)
            }
        );
    }

    #[test]
    fn select_talon_falls_back_to_talon() {
        let mut g = stockless();
        select_talon(&mut g);
        assert_eq!(g.cursor.selection(), PileId::Talon);
    }

    #[test]
    fn destination_lap_with_no_target_aborts_to_source() {
        let mut g = GameState::new(Settings::default(), 0);
        g.stock = Stock::from_parts(vec![card(Rank::Five, Suit::Hearts)], 0, 0).unwrap();
        g.cursor = Cursor::SelectingDestination {
            source: PileId::Talon,
            selection: PileId::Foundations,
        };
        select_next_valid_pile(&mut g);
        assert_eq!(
            g.cursor,
            Cursor::SelectingSource {
                selection: PileId::Talon
            }
        );
    }

    #[test]
    fn destination_walk_finds_tableau_target() {
        let mut g = GameState::new(Settings::default(), 0);
        g.stock = Stock::from_parts(vec![card(Rank::Five, Suit::Hearts)], 0, 0).unwrap();
        g.tableau[4] = TableauPile::from_parts(vec![card(Rank::Six, Suit::Clubs)], 0).unwrap();
        g.cursor = Cursor::SelectingDestination {
            source: PileId::Talon,
            selection: PileId::Foundations,
        };
        select_valid_pile(&mut g);
        assert_eq!(
            g.cursor,
            Cursor::SelectingDestination {
                source: PileId::Talon,
                selection: PileId::Tableau(4)
            }
        );
    }

    #[test]
    fn won_game_ignores_select_talon() {
        let mut g = stockless();
        g.win = true;
        g.cursor = Cursor::SelectingSource {
            selection: PileId::Foundations,
        };
        select_talon(&mut g);
        assert_eq!(g.cursor.selection(), PileId::Foundations);
    }
}
