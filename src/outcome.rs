//! Round outcome categories and the settlement resolver.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::hand::Hand;

/// Payout multiplier for a regular win (returned stake plus winnings).
const WIN_PAYS: f64 = 2.0;
/// Payout multiplier for a player natural.
const BLACKJACK_PAYS: f64 = 2.5;

/// Final category of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Player went over 21.
    PlayerBust,
    /// Dealer went over 21.
    DealerBust,
    /// Player holds a two-card 21.
    PlayerBlackjack,
    /// Dealer holds a two-card 21.
    DealerBlackjack,
    /// Player total beats the dealer's.
    PlayerWin,
    /// Dealer total beats the player's.
    DealerWin,
    /// Equal totals.
    Tie,
}

impl Outcome {
    /// The snake_case wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlayerBust => "player_bust",
            Self::DealerBust => "dealer_bust",
            Self::PlayerBlackjack => "player_blackjack",
            Self::DealerBlackjack => "dealer_blackjack",
            Self::PlayerWin => "player_win",
            Self::DealerWin => "dealer_win",
            Self::Tie => "tie",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a round together with its wager-relative payout.
///
/// Positive amounts are player gains, negative amounts are losses, zero is a
/// push. The stake itself was debited when the session started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    /// The outcome category.
    pub outcome: Outcome,
    /// Signed payout relative to the wager.
    pub amount: f64,
}

/// Resolves a finished round.
///
/// Checks run in order and the first match wins. Bust checks come first, so a
/// player natural can never itself bust; the player natural is checked before
/// the dealer's, so simultaneous two-card 21s resolve as a player blackjack
/// unless `push_on_double_blackjack` is set.
#[must_use]
pub fn resolve(
    player: &Hand,
    dealer: &Hand,
    wager: f64,
    push_on_double_blackjack: bool,
) -> Settlement {
    let player_total = player.total();
    let dealer_total = dealer.total();

    let (outcome, amount) = if player_total > 21 {
        (Outcome::PlayerBust, -wager)
    } else if dealer_total > 21 {
        (Outcome::DealerBust, WIN_PAYS * wager)
    } else if push_on_double_blackjack && player.is_blackjack() && dealer.is_blackjack() {
        (Outcome::Tie, 0.0)
    } else if player.is_blackjack() {
        (Outcome::PlayerBlackjack, BLACKJACK_PAYS * wager)
    } else if dealer.is_blackjack() {
        (Outcome::DealerBlackjack, -wager)
    } else if player_total > dealer_total {
        (Outcome::PlayerWin, WIN_PAYS * wager)
    } else if player_total < dealer_total {
        (Outcome::DealerWin, -wager)
    } else {
        (Outcome::Tie, 0.0)
    };

    Settlement { outcome, amount }
}
