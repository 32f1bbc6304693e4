//! Settlement collaborator interface.
//!
//! The table never holds money itself. Balance custody lives behind the
//! [`Ledger`] trait so the engine stays testable without any external
//! settlement backend; the table calls it to check and debit the wager at
//! session start and to credit winnings at settlement.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::PlayerId;

/// Errors surfaced by a ledger backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// No account exists for this player.
    #[error("no account for player {0}")]
    UnknownAccount(PlayerId),
    /// The account balance does not cover the requested debit.
    #[error("balance of player {0} does not cover the debit")]
    InsufficientBalance(PlayerId),
    /// The backend failed for a reason outside the engine's control.
    #[error("ledger backend error: {0}")]
    Backend(String),
}

/// Balance custody for wagering.
///
/// Implementations are expected to be synchronous from the engine's point of
/// view; `start_session` blocks on the debit before any cards are dealt.
pub trait Ledger {
    /// Returns the spendable balance for a player.
    fn balance(&self, player: PlayerId) -> Result<f64, LedgerError>;

    /// Removes `amount` from a player's balance.
    fn debit(&self, player: PlayerId, amount: f64) -> Result<(), LedgerError>;

    /// Adds `amount` to a player's balance.
    fn credit(&self, player: PlayerId, amount: f64) -> Result<(), LedgerError>;
}

/// Process-local ledger used by tests and the demo CLI.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    accounts: Mutex<HashMap<PlayerId, f64>>,
}

impl InMemoryLedger {
    /// Creates a ledger with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens (or overwrites) an account with the given balance.
    pub fn open_account(&self, player: PlayerId, balance: f64) {
        self.lock_accounts().insert(player, balance);
    }

    fn lock_accounts(&self) -> std::sync::MutexGuard<'_, HashMap<PlayerId, f64>> {
        self.accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Ledger for InMemoryLedger {
    fn balance(&self, player: PlayerId) -> Result<f64, LedgerError> {
        self.lock_accounts()
            .get(&player)
            .copied()
            .ok_or(LedgerError::UnknownAccount(player))
    }

    fn debit(&self, player: PlayerId, amount: f64) -> Result<(), LedgerError> {
        let mut accounts = self.lock_accounts();
        let balance = accounts
            .get_mut(&player)
            .ok_or(LedgerError::UnknownAccount(player))?;

        if *balance < amount {
            return Err(LedgerError::InsufficientBalance(player));
        }

        *balance -= amount;
        Ok(())
    }

    fn credit(&self, player: PlayerId, amount: f64) -> Result<(), LedgerError> {
        let mut accounts = self.lock_accounts();
        let balance = accounts
            .get_mut(&player)
            .ok_or(LedgerError::UnknownAccount(player))?;

        *balance += amount;
        Ok(())
    }
}
