use crate::PlayerId;
use crate::card::Card;
use crate::error::{SettleError, StatusError, TurnError};
use crate::ledger::Ledger;
use crate::outcome::{Settlement, resolve};

use super::Table;

/// The dealer stands at this total or above, hard or soft.
const DEALER_STANDS_AT: u8 = 17;

impl<L: Ledger> Table<L> {
    /// Plays out the dealer's hand: draws until the total reaches 17, then
    /// stands. The dealer stands on any 17, hard or soft.
    ///
    /// Returns the dealer's final hand.
    ///
    /// # Errors
    ///
    /// Returns an error if no session exists for the player, or the deck runs
    /// out while the dealer still has to draw.
    pub fn play_dealer_turn(&self, player_id: PlayerId) -> Result<Vec<Card>, TurnError> {
        let mut sessions = self.lock_sessions();
        let session = sessions
            .get_mut(&player_id)
            .ok_or(TurnError::SessionNotFound(player_id))?;

        while session.dealer_hand.total() < DEALER_STANDS_AT {
            let card = session
                .deck
                .draw()
                .ok_or(TurnError::EmptyDeck(player_id))?;
            session.dealer_hand.add_card(card);
        }

        let hand = session.dealer_hand.cards().to_vec();
        tracing::debug!(
            player_id,
            total = session.dealer_hand.total(),
            cards = hand.len(),
            "dealer stands"
        );
        Ok(hand)
    }

    /// Resolves the round from the current hands.
    ///
    /// Pure with respect to session state and the ledger; safe to call
    /// repeatedly.
    ///
    /// # Errors
    ///
    /// Returns an error if no session exists for the player.
    pub fn check_status(&self, player_id: PlayerId) -> Result<Settlement, StatusError> {
        let sessions = self.lock_sessions();
        let session = sessions
            .get(&player_id)
            .ok_or(StatusError::SessionNotFound(player_id))?;

        Ok(resolve(
            &session.player_hand,
            &session.dealer_hand,
            session.wager,
            self.options.push_on_double_blackjack,
        ))
    }

    /// Resolves the round and credits any positive payout to the ledger.
    ///
    /// The stake was debited when the session started, so losses need no
    /// further ledger motion and a push credits nothing under this ruleset's
    /// amount table. Each round settles at most once; the latch clears when
    /// the session is re-dealt or reset.
    ///
    /// # Errors
    ///
    /// Returns an error if no session exists for the player, the round was
    /// already settled, or the ledger credit fails.
    pub fn settle(&self, player_id: PlayerId) -> Result<Settlement, SettleError> {
        let mut sessions = self.lock_sessions();
        let session = sessions
            .get_mut(&player_id)
            .ok_or(SettleError::SessionNotFound(player_id))?;

        if session.settled {
            return Err(SettleError::AlreadySettled(player_id));
        }

        let settlement = resolve(
            &session.player_hand,
            &session.dealer_hand,
            session.wager,
            self.options.push_on_double_blackjack,
        );

        if settlement.amount > 0.0 {
            self.ledger().credit(player_id, settlement.amount)?;
        }
        session.settled = true;

        tracing::info!(
            player_id,
            outcome = %settlement.outcome,
            amount = settlement.amount,
            "round settled"
        );
        Ok(settlement)
    }
}
