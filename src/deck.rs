//! Single-deck lifecycle: canonical build, shuffle, sequential draw.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, RANKS, SUITS};

/// An ordered sequence of cards. Draws pop from the tail, so the last element
/// is the logical top of the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds the canonical 52-card deck (ranks outer, suits inner) and
    /// applies a uniform shuffle.
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);

        for rank in RANKS {
            for suit in SUITS {
                cards.push(Card::new(suit, rank));
            }
        }

        cards.shuffle(rng);
        Self { cards }
    }

    /// Builds a deck with a fixed order. Draws pop from the end of `cards`.
    ///
    /// Intended for rehearsed deals in tests and tooling.
    #[must_use]
    pub const fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Removes and returns the top card, or `None` if the deck is exhausted.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Returns the number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the remaining cards in draw order (last = next to be drawn).
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
