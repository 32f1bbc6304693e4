//! Session store and table operations.

use core::fmt;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::PlayerId;
use crate::deck::Deck;
use crate::hand::Hand;
use crate::ledger::Ledger;
use crate::options::TableOptions;

mod actions;
mod deal;
mod dealer;

pub use deal::Deal;

/// Which seat of the table a hand belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The player's seat.
    Player,
    /// The dealer's seat.
    Dealer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Player => "player",
            Self::Dealer => "dealer",
        })
    }
}

/// A string named neither seat of the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid recipient: {0:?}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(Self::Player),
            "dealer" => Ok(Self::Dealer),
            other => Err(ParseRoleError(other.to_owned())),
        }
    }
}

/// Live game state for one player id: one deck, one hand per seat, and the
/// wager fixed when the session was created.
#[derive(Debug, Clone)]
pub struct Session {
    /// Remaining cards.
    pub deck: Deck,
    /// The player's hand.
    pub player_hand: Hand,
    /// The dealer's hand.
    pub dealer_hand: Hand,
    /// Wager debited at session creation. Never mutated afterwards.
    pub wager: f64,
    /// Whether this round has already been settled against the ledger.
    pub settled: bool,
}

impl Session {
    fn fresh(deck: Deck, wager: f64) -> Self {
        Self {
            deck,
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
            wager,
            settled: false,
        }
    }

    /// Returns the hand for the given seat.
    #[must_use]
    pub const fn hand(&self, role: Role) -> &Hand {
        match role {
            Role::Player => &self.player_hand,
            Role::Dealer => &self.dealer_hand,
        }
    }

    pub(crate) const fn hand_mut(&mut self, role: Role) -> &mut Hand {
        match role {
            Role::Player => &mut self.player_hand,
            Role::Dealer => &mut self.dealer_hand,
        }
    }
}

/// A blackjack table: one session per player id, plus the injected ledger.
///
/// All state is in-memory. The session map is guarded by a single mutex, so
/// calls for the same player id are serialized and calls for different
/// players never observe each other's state. Sessions live until an explicit
/// [`reset`](Table::reset) or process exit; callers with unbounded tenants
/// should reap idle player ids themselves.
pub struct Table<L> {
    /// Table rules.
    pub options: TableOptions,
    /// Live sessions, keyed by player id.
    pub sessions: Mutex<HashMap<PlayerId, Session>>,
    ledger: L,
    rng: Mutex<ChaCha8Rng>,
}

impl<L: Ledger> Table<L> {
    /// Creates a table whose shuffles are seeded from OS entropy.
    #[must_use]
    pub fn new(ledger: L, options: TableOptions) -> Self {
        Self::with_rng(ledger, options, ChaCha8Rng::from_os_rng())
    }

    /// Creates a table with a fixed shuffle seed.
    ///
    /// Deterministic shuffles are for tests and simulations only; production
    /// tables must use [`Table::new`] so deck order is never predictable.
    #[must_use]
    pub fn with_seed(ledger: L, options: TableOptions, seed: u64) -> Self {
        Self::with_rng(ledger, options, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(ledger: L, options: TableOptions, rng: ChaCha8Rng) -> Self {
        Self {
            options,
            sessions: Mutex::new(HashMap::new()),
            ledger,
            rng: Mutex::new(rng),
        }
    }

    /// Returns the injected ledger.
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    pub(crate) fn lock_sessions(&self) -> MutexGuard<'_, HashMap<PlayerId, Session>> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn lock_rng(&self) -> MutexGuard<'_, ChaCha8Rng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Unconditionally replaces the player's session with a freshly shuffled
    /// deck and empty hands. The ledger is not touched.
    pub fn reset(&self, player_id: PlayerId) {
        let deck = Deck::shuffled(&mut *self.lock_rng());
        self.lock_sessions()
            .insert(player_id, Session::fresh(deck, 0.0));
        tracing::info!(player_id, "session reset");
    }
}
