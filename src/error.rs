//! Error types for table operations.

use thiserror::Error;

use crate::PlayerId;
use crate::ledger::LedgerError;

/// Errors that can occur when starting a session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StartError {
    /// Wager is negative or not a finite number.
    #[error("wager must be a non-negative finite amount")]
    InvalidWager,
    /// Ledger balance is below the requested wager.
    #[error("insufficient funds for player {0}")]
    InsufficientFunds(PlayerId),
    /// Not enough cards remain to deal the initial hands.
    #[error("not enough cards left to deal for player {0}")]
    DeckExhausted(PlayerId),
    /// A session already exists and the table rejects rejoins.
    #[error("session already exists for player {0}")]
    SessionExists(PlayerId),
    /// The ledger collaborator failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Errors that can occur when drawing a card into a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    /// No session exists for this player.
    #[error("no session for player {0}")]
    SessionNotFound(PlayerId),
    /// The session's deck is exhausted.
    #[error("deck is empty for player {0}")]
    EmptyDeck(PlayerId),
}

/// Errors that can occur while the dealer plays out their hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    /// No session exists for this player.
    #[error("no session for player {0}")]
    SessionNotFound(PlayerId),
    /// The session's deck ran out while the dealer had to draw.
    #[error("deck is empty for player {0}")]
    EmptyDeck(PlayerId),
}

/// Errors that can occur when reading session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatusError {
    /// No session exists for this player.
    #[error("no session for player {0}")]
    SessionNotFound(PlayerId),
}

/// Errors that can occur when settling a finished round.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettleError {
    /// No session exists for this player.
    #[error("no session for player {0}")]
    SessionNotFound(PlayerId),
    /// The round has already been settled against the ledger.
    #[error("round already settled for player {0}")]
    AlreadySettled(PlayerId),
    /// The ledger collaborator failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
