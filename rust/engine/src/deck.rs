use rand::{RngCore, SeedableRng};

use crate::cards::{full_deck, Card, DECK_SIZE};

const LCG_MULTIPLIER: u32 = 214_013;
const LCG_INCREMENT: u32 = 2_531_011;
const LCG_MASK: u32 = (1 << 31) - 1;

/// 31-bit linear congruential generator used to shuffle the deck.
///
/// `seed' = (seed * 214013 + 2531011) mod 2^31`. A given seed always yields the same
/// deal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the generator and return the new 31-bit state.
    pub fn next_raw(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            & LCG_MASK;
        self.state
    }

    /// Uniform value in `0..=max` from the top 5 bits of the state, by rejection.
    ///
    /// The top 5 bits only reach 31, so any `max >= 31` accepts the first sample.
    /// `max` must be below 64.
    pub fn below_or_equal(&mut self, max: u8) -> u8 {
        debug_assert!(max < 64);
        loop {
            let v = (self.next_raw() >> 26) as u8;
            if v <= max {
                return v;
            }
        }
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_raw());
        let lo = u64::from(self.next_raw());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Lcg {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Lcg::new(u32::from_le_bytes(seed))
    }

    // low 32 bits, same as `Lcg::new`
    fn seed_from_u64(state: u64) -> Self {
        Lcg::new(state as u32)
    }
}

/// A 52-card deck shuffled by [`Lcg`].
///
/// # Examples
///
/// ```
/// use klondike_engine::deck::Deck;
///
/// // Same seed produces the same order
/// let a = Deck::new_with_seed(42);
/// let b = Deck::new_with_seed(42);
/// assert_eq!(a.cards(), b.cards());
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
    rng: Lcg,
}

impl Deck {
    /// Build the ordered deck and shuffle it once with `seed`.
    pub fn new_with_seed(seed: u32) -> Self {
        let mut deck = Self {
            cards: full_deck(),
            rng: Lcg::new(seed),
        };
        deck.shuffle();
        deck
    }

    /// Fisher-Yates from the last index down to 1, continuing the generator.
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        for i in (1..DECK_SIZE).rev() {
            let j = usize::from(self.rng.below_or_equal(i as u8));
            self.cards.swap(i, j);
        }
    }

    pub fn cards(&self) -> &[Card; DECK_SIZE] {
        &self.cards
    }
}
