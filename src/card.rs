//! Card types and the textual wire format.

use core::fmt;
use core::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

impl Suit {
    /// The lowercase suit name used on the wire.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hearts => "hearts",
            Self::Diamonds => "diamonds",
            Self::Clubs => "clubs",
            Self::Spades => "spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    pub rank: u8,
}

impl Card {
    /// Creates a new card.
    ///
    /// Note: This function does not validate the rank. Values outside 1..=13
    /// are accepted but may yield non-standard results when evaluating a hand.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self { suit, rank }
    }
}

const fn rank_token(rank: u8) -> Option<&'static str> {
    match rank {
        1 => Some("A"),
        11 => Some("J"),
        12 => Some("Q"),
        13 => Some("K"),
        _ => None,
    }
}

/// Cards render as `"<rank> of <suit>"`, e.g. `A of spades`, `10 of hearts`.
/// This is the persisted wire representation; existing callers depend on it.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match rank_token(self.rank) {
            Some(token) => write!(f, "{token} of {}", self.suit),
            None => write!(f, "{} of {}", self.rank, self.suit),
        }
    }
}

/// A string failed to parse as a card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a card: {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses the wire form back into a card.
    ///
    /// # Example
    ///
    /// ```
    /// use pitboss::{Card, Suit};
    ///
    /// let card: Card = "A of spades".parse().unwrap();
    /// assert_eq!(card, Card::new(Suit::Spades, 1));
    /// assert_eq!(card.to_string(), "A of spades");
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCardError(s.to_owned());
        let (token, suit_name) = s.split_once(" of ").ok_or_else(err)?;

        let rank = match token {
            "A" => 1,
            "J" => 11,
            "Q" => 12,
            "K" => 13,
            n => match n.parse::<u8>() {
                Ok(v @ 2..=10) => v,
                _ => return Err(err()),
            },
        };

        let suit = match suit_name {
            "hearts" => Suit::Hearts,
            "diamonds" => Suit::Diamonds,
            "clubs" => Suit::Clubs,
            "spades" => Suit::Spades,
            _ => return Err(err()),
        };

        Ok(Self { suit, rank })
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

/// Ranks in canonical order: 2 through 10, then J, Q, K, A.
pub const RANKS: [u8; 13] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 1];

/// Suits in canonical order.
pub const SUITS: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
