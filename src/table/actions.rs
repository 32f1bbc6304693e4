use crate::PlayerId;
use crate::card::Card;
use crate::error::{DrawError, StatusError};
use crate::hand::HandValue;
use crate::ledger::Ledger;

use super::{Role, Table};

impl<L: Ledger> Table<L> {
    /// Draws the top card of the session's deck into the named seat's hand.
    ///
    /// # Errors
    ///
    /// Returns an error if no session exists for the player or the deck is
    /// exhausted. A failed draw leaves the hand untouched.
    pub fn draw_for(&self, player_id: PlayerId, role: Role) -> Result<Card, DrawError> {
        let mut sessions = self.lock_sessions();
        let session = sessions
            .get_mut(&player_id)
            .ok_or(DrawError::SessionNotFound(player_id))?;

        let card = session
            .deck
            .draw()
            .ok_or(DrawError::EmptyDeck(player_id))?;
        session.hand_mut(role).add_card(card);

        tracing::debug!(player_id, %role, card = %card, "card drawn");
        Ok(card)
    }

    /// Evaluates the named seat's hand.
    ///
    /// # Errors
    ///
    /// Returns an error if no session exists for the player.
    pub fn hand_value(&self, player_id: PlayerId, role: Role) -> Result<HandValue, StatusError> {
        let sessions = self.lock_sessions();
        let session = sessions
            .get(&player_id)
            .ok_or(StatusError::SessionNotFound(player_id))?;

        Ok(session.hand(role).evaluate())
    }
}
