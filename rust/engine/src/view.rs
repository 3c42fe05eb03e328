use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardFace};
use crate::game::{GameState, Mode};
use crate::piles::FOUNDATION_PILES;
use crate::settings::{ScoreVisibility, Settings};

/// One tableau pile as the renderer needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableauView {
    /// Number of face-down cards under the run
    pub hidden: usize,
    /// Face-up run, bottom card first
    pub face_up: Vec<Card>,
}

/// Read-only snapshot of everything drawn on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    /// Stock slot: card back, empty frame once only the window is left, or nothing
    pub stock: CardFace,
    /// Talon window, left to right; the last card is playable
    pub talon: Vec<Card>,
    pub foundations: [CardFace; FOUNDATION_PILES],
    pub tableau: Vec<TableauView>,
    pub mode: Mode,
    /// Selected pile index (0..=6 tableau, 7 talon, 8 foundations); `None` once won
    pub selection: Option<u8>,
    /// Formatted score, `None` when hidden
    pub score: Option<String>,
    pub win: bool,
    pub settings: Settings,
    pub flips: u8,
}

impl BoardView {
    pub fn from_state(state: &GameState) -> Self {
        let stock = state.stock();
        let stock_face = if stock.is_empty() {
            CardFace::Cutoff
        } else if stock.has_undrawn() {
            CardFace::FaceDown
        } else {
            CardFace::Empty
        };
        let tops = *state.foundations().tops();
        let foundations = tops.map(CardFace::from);
        let tableau = state
            .tableau()
            .iter()
            .map(|p| TableauView {
                hidden: p.hidden_count(),
                face_up: p.face_up().to_vec(),
            })
            .collect();
        let score = match state.settings().score {
            ScoreVisibility::Show => Some(format_score(state.score())),
            ScoreVisibility::Hide => None,
        };
        Self {
            stock: stock_face,
            talon: stock.window().to_vec(),
            foundations,
            tableau,
            mode: state.cursor().mode(),
            selection: (!state.is_won()).then(|| state.cursor().selection().index()),
            score,
            win: state.is_won(),
            settings: state.settings(),
            flips: state.flips(),
        }
    }
}

/// `$N` for non-negative scores, `-$N` for negative.
pub fn format_score(score: i32) -> String {
    if score < 0 {
        format!("-${}", score.unsigned_abs())
    } else {
        format!("${}", score)
    }
}
