use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of distinct cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Represents one of the four suits in a standard 52-card deck.
/// Discriminants are the suit values packed into a [`Card`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit (♠), black
    Spades = 0,
    /// Clubs suit (♣), black
    Clubs = 1,
    /// Hearts suit (♥), red
    Hearts = 2,
    /// Diamonds suit (♦), red
    Diamonds = 3,
}

impl Suit {
    pub fn from_u8(v: u8) -> Suit {
        match v & 3 {
            0 => Suit::Spades,
            1 => Suit::Clubs,
            2 => Suit::Hearts,
            _ => Suit::Diamonds,
        }
    }

    /// Hearts and diamonds are red; the color bit is the high bit of the suit value.
    pub fn is_red(self) -> bool {
        (self as u8) >> 1 == 1
    }

    fn symbol(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Clubs => 'C',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
        }
    }
}

/// Represents the rank of a card from Ace (0) through King (12).
/// Foundations build upward in this order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (0)
    Ace = 0,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (10)
    Jack,
    /// Queen (11)
    Queen,
    /// King (12)
    King,
}

impl Rank {
    pub fn from_u8(v: u8) -> Option<Rank> {
        let rank = match v {
            0 => Rank::Ace,
            1 => Rank::Two,
            2 => Rank::Three,
            3 => Rank::Four,
            4 => Rank::Five,
            5 => Rank::Six,
            6 => Rank::Seven,
            7 => Rank::Eight,
            8 => Rank::Nine,
            9 => Rank::Ten,
            10 => Rank::Jack,
            11 => Rank::Queen,
            12 => Rank::King,
            _ => return None,
        };
        Some(rank)
    }

    /// Single-letter rank as printed on the card face.
    pub fn symbol(self) -> char {
        b"A23456789TJQK"[self as usize] as char
    }
}

/// A single playing card packed into one byte as `rank * 4 + suit`.
///
/// The packed value is the form stored in the save buffer, so a card is always in
/// `0..52`; constructors reject anything else.
///
/// # Examples
///
/// ```
/// use klondike_engine::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::King, Suit::Hearts);
/// assert_eq!(card.value(), 50);
/// assert_eq!(Card::from_value(50), Some(card));
/// assert!(card.is_red());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card((rank as u8) * 4 + suit as u8)
    }

    pub fn from_value(value: u8) -> Option<Self> {
        if usize::from(value) < DECK_SIZE {
            Some(Card(value))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn rank(self) -> Rank {
        rank_of(self)
    }

    pub fn suit(self) -> Suit {
        suit_of(self)
    }

    pub fn is_red(self) -> bool {
        is_red(self.suit())
    }

    pub fn is_king(self) -> bool {
        self.rank() == Rank::King
    }
}

impl TryFrom<u8> for Card {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Card::from_value(value).ok_or_else(|| format!("card value {} out of range", value))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank().symbol(), self.suit().symbol())
    }
}

pub fn rank_of(card: Card) -> Rank {
    debug_assert!(usize::from(card.0) < DECK_SIZE, "card value {} out of range", card.0);
    Rank::from_u8(card.0 / 4).unwrap_or(Rank::King)
}

pub fn suit_of(card: Card) -> Suit {
    Suit::from_u8(card.0 % 4)
}

pub fn is_red(suit: Suit) -> bool {
    suit.is_red()
}

/// All 52 cards in ascending packed order, the unshuffled deck.
pub fn full_deck() -> [Card; DECK_SIZE] {
    let mut deck = [Card(0); DECK_SIZE];
    for (i, slot) in deck.iter_mut().enumerate() {
        *slot = Card(i as u8);
    }
    deck
}

/// What a single card slot on the board should be drawn as.
/// Only the renderer sees `FaceDown` and `Cutoff`; game state stores plain cards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "card", rename_all = "snake_case")]
pub enum CardFace {
    /// Empty pile: draw the card frame only
    Empty,
    /// Face-down card back
    FaceDown,
    /// Nothing at all is drawn
    Cutoff,
    /// A face-up card
    Card(Card),
}

impl From<Option<Card>> for CardFace {
    fn from(card: Option<Card>) -> Self {
        match card {
            Some(c) => CardFace::Card(c),
            None => CardFace::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_rank_and_suit() {
        let c = Card::from_value(43).unwrap();
        assert_eq!(c.rank(), Rank::Jack);
        assert_eq!(c.suit(), Suit::Diamonds);
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).value(), 0);
        assert_eq!(Card::new(Rank::King, Suit::Diamonds).value(), 51);
    }

    #[test]
    fn every_card_maps_to_its_rank() {
        for card in full_deck() {
            assert_eq!(rank_of(card) as u8, card.value() / 4);
            assert_eq!(suit_of(card) as u8, card.value() % 4);
        }
        assert_eq!(rank_of(Card::from_value(51).unwrap()), Rank::King);
    }

    #[test]
    fn color_follows_high_suit_bit() {
        assert!(!is_red(Suit::Spades));
        assert!(!is_red(Suit::Clubs));
        assert!(is_red(Suit::Hearts));
        assert!(is_red(Suit::Diamonds));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Card::from_value(52).is_none());
        assert!(Card::from_value(255).is_none());
        assert!(Card::try_from(60u8).is_err());
    }

    #[test]
    fn displays_rank_then_suit() {
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "TH");
        assert_eq!(Card::new(Rank::Ace, Suit::Clubs).to_string(), "AC");
    }

    #[test]
    fn full_deck_is_ordered() {
        let deck = full_deck();
        for (i, c) in deck.iter().enumerate() {
            assert_eq!(usize::from(c.value()), i);
        }
    }
}
