//! Table configuration options.

/// What `start_session` does when a session already exists for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum RejoinPolicy {
    /// Keep the session's partially-drawn deck and recorded wager, re-deal
    /// both hands from the remaining cards, and skip the ledger.
    #[default]
    ContinueDeck,
    /// Replace the session wholesale: new shuffled deck, new wager, new
    /// ledger debit.
    Fresh,
    /// Fail the call with `SessionExists`.
    Reject,
}

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use pitboss::{RejoinPolicy, TableOptions};
///
/// let options = TableOptions::default()
///     .with_push_on_double_blackjack(true)
///     .with_rejoin(RejoinPolicy::Reject);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableOptions {
    /// Whether simultaneous two-card 21s resolve as a push instead of a
    /// player blackjack win.
    pub push_on_double_blackjack: bool,
    /// Behavior of `start_session` when the player already has a session.
    pub rejoin: RejoinPolicy,
}

impl TableOptions {
    /// Sets whether simultaneous two-card 21s resolve as a push.
    ///
    /// # Example
    ///
    /// ```
    /// use pitboss::TableOptions;
    ///
    /// let options = TableOptions::default().with_push_on_double_blackjack(true);
    /// assert!(options.push_on_double_blackjack);
    /// ```
    #[must_use]
    pub const fn with_push_on_double_blackjack(mut self, push: bool) -> Self {
        self.push_on_double_blackjack = push;
        self
    }

    /// Sets the rejoin policy.
    ///
    /// # Example
    ///
    /// ```
    /// use pitboss::{RejoinPolicy, TableOptions};
    ///
    /// let options = TableOptions::default().with_rejoin(RejoinPolicy::Fresh);
    /// assert_eq!(options.rejoin, RejoinPolicy::Fresh);
    /// ```
    #[must_use]
    pub const fn with_rejoin(mut self, rejoin: RejoinPolicy) -> Self {
        self.rejoin = rejoin;
        self
    }
}
