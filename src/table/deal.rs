use serde::Serialize;

use crate::PlayerId;
use crate::card::Card;
use crate::deck::Deck;
use crate::error::StartError;
use crate::hand::Hand;
use crate::ledger::Ledger;
use crate::options::RejoinPolicy;

use super::{Session, Table};

/// Cards needed for the initial deal: two per seat.
const INITIAL_DEAL: usize = 4;

/// The visible result of an initial deal: both player cards and the dealer's
/// face-up card. The dealer's first-dealt card stays hidden even though it
/// already exists in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deal {
    /// The player's two-card hand.
    pub player_hand: Vec<Card>,
    /// The second-dealt dealer card.
    pub dealer_face_up: Card,
}

impl<L: Ledger> Table<L> {
    /// Starts (or re-enters) a session for the player and deals the initial
    /// hands.
    ///
    /// For a new session the wager is checked against the ledger balance and
    /// debited before any card is dealt; on any failure no session is
    /// created. An existing session is handled per the table's
    /// [`RejoinPolicy`]: the default keeps the partially-drawn deck and the
    /// recorded wager (the `wager` argument is ignored and the ledger is not
    /// touched) and re-deals both hands from the remaining cards.
    ///
    /// # Errors
    ///
    /// Returns an error if the wager is negative or non-finite, the ledger
    /// balance is below the wager, the ledger call fails, fewer than four
    /// cards remain to re-deal from, or the table rejects rejoins.
    pub fn start_session(&self, player_id: PlayerId, wager: f64) -> Result<Deal, StartError> {
        if !wager.is_finite() || wager < 0.0 {
            return Err(StartError::InvalidWager);
        }

        let mut sessions = self.lock_sessions();

        match (sessions.get_mut(&player_id), self.options.rejoin) {
            (Some(_), RejoinPolicy::Reject) => {
                return Err(StartError::SessionExists(player_id));
            }
            (Some(session), RejoinPolicy::ContinueDeck) => {
                let deal = Self::deal_initial(player_id, session)?;
                tracing::debug!(player_id, "re-dealt hands from the session's remaining deck");
                return Ok(deal);
            }
            _ => {}
        }

        // New session, or a Fresh rejoin: stake the wager, then build a deck.
        // The debit happens before any card is dealt; a failure here leaves
        // no session behind.
        if wager > 0.0 {
            let balance = self.ledger().balance(player_id)?;
            if balance < wager {
                return Err(StartError::InsufficientFunds(player_id));
            }
            self.ledger().debit(player_id, wager)?;
        }

        let deck = Deck::shuffled(&mut *self.lock_rng());
        let mut session = Session::fresh(deck, wager);
        let deal = Self::deal_initial(player_id, &mut session)?;
        sessions.insert(player_id, session);

        tracing::info!(player_id, wager, "session started");
        Ok(deal)
    }

    /// Clears both hands and deals two cards each, player first.
    fn deal_initial(player_id: PlayerId, session: &mut Session) -> Result<Deal, StartError> {
        if session.deck.len() < INITIAL_DEAL {
            return Err(StartError::DeckExhausted(player_id));
        }

        session.player_hand = Hand::new();
        session.dealer_hand = Hand::new();
        session.settled = false;

        let exhausted = StartError::DeckExhausted(player_id);

        // Deal order is load-bearing: player, player, dealer, dealer.
        let first = session.deck.draw().ok_or(exhausted.clone())?;
        let second = session.deck.draw().ok_or(exhausted.clone())?;
        session.player_hand.add_card(first);
        session.player_hand.add_card(second);

        let hole = session.deck.draw().ok_or(exhausted.clone())?;
        let face_up = session.deck.draw().ok_or(exhausted)?;
        session.dealer_hand.add_card(hole);
        session.dealer_hand.add_card(face_up);

        Ok(Deal {
            player_hand: session.player_hand.cards().to_vec(),
            dealer_face_up: face_up,
        })
    }
}
