//! Board and card formatters for terminal display.
//!
//! Pure functions over the engine's [`BoardView`]. Suits use Unicode symbols with an
//! ASCII letter fallback for terminals that cannot show them.
//!
//! ## Example
//!
//! ```rust
//! use klondike_engine::cards::{Card, Rank, Suit};
//! use klondike_cli::formatters::format_card;
//!
//! let ace = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(ace) == "A♠" || format_card(ace) == "AS");
//! ```

use std::io::{self, Write};

use klondike_engine::cards::{Card, CardFace, Suit};
use klondike_engine::game::{Mode, PileId};
use klondike_engine::view::BoardView;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> &'static str {
    if supports_unicode() {
        match suit {
            Suit::Spades => "♠",
            Suit::Clubs => "♣",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
        }
    } else {
        match suit {
            Suit::Spades => "S",
            Suit::Clubs => "C",
            Suit::Hearts => "H",
            Suit::Diamonds => "D",
        }
    }
}

/// Rank letter followed by the suit symbol, e.g. `T♥`.
pub fn format_card(card: Card) -> String {
    format!("{}{}", card.rank().symbol(), format_suit(card.suit()))
}

/// Two-column cell for a single card slot.
pub fn format_face(face: CardFace) -> String {
    match face {
        CardFace::Empty => "[]".to_string(),
        CardFace::FaceDown => "##".to_string(),
        CardFace::Cutoff => "  ".to_string(),
        CardFace::Card(card) => format_card(card),
    }
}

fn marker(view: &BoardView, pile: PileId) -> char {
    if view.selection != Some(pile.index()) {
        ' '
    } else if view.mode == Mode::SelectDestination {
        '*'
    } else {
        '>'
    }
}

/// Render the whole board.
///
/// The selected pile is marked with `>` while choosing a source and `*` while
/// choosing a destination.
pub fn render_board(view: &BoardView, out: &mut dyn Write) -> io::Result<()> {
    let talon = if view.talon.is_empty() {
        "[]".to_string()
    } else {
        view.talon
            .iter()
            .map(|&c| format_card(c))
            .collect::<Vec<_>>()
            .join(" ")
    };
    writeln!(
        out,
        "{} talon  {} {}",
        marker(view, PileId::Talon),
        format_face(view.stock),
        talon
    )?;
    let foundations = view
        .foundations
        .iter()
        .map(|&f| format_face(f))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(
        out,
        "{} found  {}",
        marker(view, PileId::Foundations),
        foundations
    )?;
    for (i, pile) in view.tableau.iter().enumerate() {
        let mut line = format!("{} {}     ", marker(view, PileId::Tableau(i)), i + 1);
        if pile.hidden == 0 && pile.face_up.is_empty() {
            line.push_str(" []");
        }
        for _ in 0..pile.hidden {
            line.push_str(" ##");
        }
        for &card in &pile.face_up {
            line.push(' ');
            line.push_str(&format_card(card));
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    writeln!(out, "{}", status_line(view))?;
    if view.win {
        writeln!(out, "You win!")?;
    }
    Ok(())
}

/// Score, draw mode and flips, one line.
pub fn status_line(view: &BoardView) -> String {
    let mut parts = Vec::new();
    if let Some(score) = &view.score {
        parts.push(format!("score {}", score));
    }
    parts.push(format!("draw {}", view.settings.draw.as_str()));
    parts.push(format!(
        "flips {} (limit {})",
        view.flips,
        view.settings.flip_limit.as_str()
    ));
    parts.join("  ")
}
