//! Hand representation and valuation.

use serde::{Deserialize, Serialize};

use crate::card::Card;

const fn card_value(rank: u8) -> u8 {
    match rank {
        1 => 11,
        2..=10 => rank,
        11..=13 => 10,
        _ => 0,
    }
}

/// Derived value of a hand: the resolved total and whether an ace is still
/// counted as 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandValue {
    /// Resolved total after ace demotion.
    pub total: u8,
    /// True if at least one ace is still counted as 11.
    pub soft: bool,
}

fn evaluate_cards(cards: &[Card]) -> HandValue {
    let mut total: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.rank == 1 {
            aces += 1;
        }
        total = total.saturating_add(card_value(card.rank));
    }

    // Demote aces from 11 to 1, one at a time, while the hand would bust.
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    HandValue {
        total,
        soft: aces > 0,
    }
}

/// An append-only sequence of cards belonging to either seat of the table.
///
/// Valuation depends only on the card multiset, never on order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Creates an empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Appends a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Evaluates the hand.
    ///
    /// Aces count as 11 and are demoted to 1 one at a time while the total
    /// exceeds 21. The result is `soft` if an ace survives at 11.
    ///
    /// # Example
    ///
    /// ```
    /// use pitboss::Hand;
    ///
    /// let mut hand = Hand::new();
    /// hand.add_card("A of spades".parse().unwrap());
    /// hand.add_card("K of hearts".parse().unwrap());
    /// let value = hand.evaluate();
    /// assert_eq!(value.total, 21);
    /// assert!(value.soft);
    /// ```
    #[must_use]
    pub fn evaluate(&self) -> HandValue {
        evaluate_cards(&self.cards)
    }

    /// Resolved total of the hand.
    #[must_use]
    pub fn total(&self) -> u8 {
        self.evaluate().total
    }

    /// Returns whether the hand is a natural (two cards totalling 21).
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.total() == 21
    }

    /// Returns whether the hand is bust (over 21).
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.total() > 21
    }
}
