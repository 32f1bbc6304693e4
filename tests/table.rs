//! Engine integration tests.

#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use pitboss::card::{RANKS, SUITS};
use pitboss::{
    Card, DECK_SIZE, Deck, DrawError, Hand, InMemoryLedger, Ledger, LedgerError, Outcome,
    RejoinPolicy, Role, SettleError, StartError, StatusError, Table, TableOptions, TurnError,
    resolve,
};

fn card(s: &str) -> Card {
    s.parse().unwrap()
}

fn hand(cards: &[&str]) -> Hand {
    let mut hand = Hand::new();
    for s in cards {
        hand.add_card(card(s));
    }
    hand
}

fn free_table() -> Table<InMemoryLedger> {
    Table::with_seed(InMemoryLedger::new(), TableOptions::default(), 42)
}

fn funded_table(player_id: u64, balance: f64) -> Table<InMemoryLedger> {
    let ledger = InMemoryLedger::new();
    ledger.open_account(player_id, balance);
    Table::with_seed(ledger, TableOptions::default(), 42)
}

fn set_deck_from_draws(table: &Table<InMemoryLedger>, player_id: u64, draws: &[&str]) {
    let mut cards: Vec<Card> = draws.iter().map(|s| card(s)).collect();
    cards.reverse();
    table
        .sessions
        .lock()
        .unwrap()
        .get_mut(&player_id)
        .unwrap()
        .deck = Deck::from_cards(cards);
}

fn set_hands(table: &Table<InMemoryLedger>, player_id: u64, player: &[&str], dealer: &[&str]) {
    let mut sessions = table.sessions.lock().unwrap();
    let session = sessions.get_mut(&player_id).unwrap();
    session.player_hand = hand(player);
    session.dealer_hand = hand(dealer);
}

#[test]
fn fresh_deck_is_the_canonical_52() {
    let mut rng = rand::rng();
    let deck = Deck::shuffled(&mut rng);

    assert_eq!(deck.len(), DECK_SIZE);

    let unique: HashSet<Card> = deck.cards().iter().copied().collect();
    assert_eq!(unique.len(), DECK_SIZE);

    for rank in RANKS {
        for suit in SUITS {
            assert!(unique.contains(&Card::new(suit, rank)));
        }
    }
}

#[test]
fn draws_deplete_one_card_at_a_time() {
    let mut rng = rand::rng();
    let mut deck = Deck::shuffled(&mut rng);

    for n in 1..=DECK_SIZE {
        assert!(deck.draw().is_some());
        assert_eq!(deck.len(), DECK_SIZE - n);
    }

    assert!(deck.is_empty());
    assert_eq!(deck.draw(), None);
}

#[test]
fn evaluation_is_order_independent() {
    let forward = hand(&["A of spades", "K of hearts"]).evaluate();
    let backward = hand(&["K of hearts", "A of spades"]).evaluate();

    assert_eq!(forward.total, 21);
    assert!(forward.soft);
    assert_eq!(forward, backward);
}

#[test]
fn aces_demote_one_at_a_time() {
    let two_aces = hand(&["A of spades", "A of hearts"]).evaluate();
    assert_eq!(two_aces.total, 12);
    assert!(two_aces.soft);

    let one_demoted = hand(&["A of spades", "A of hearts", "9 of clubs"]).evaluate();
    assert_eq!(one_demoted.total, 21);
    assert!(one_demoted.soft);

    let both_demoted = hand(&["A of spades", "A of hearts", "K of clubs", "9 of clubs"]).evaluate();
    assert_eq!(both_demoted.total, 21);
    assert!(!both_demoted.soft);
}

#[test]
fn start_session_deals_two_cards_each() {
    let table = free_table();
    let deal = table.start_session(1, 0.0).unwrap();

    assert_eq!(deal.player_hand.len(), 2);

    let sessions = table.sessions.lock().unwrap();
    let session = sessions.get(&1).unwrap();
    assert_eq!(session.player_hand.cards(), deal.player_hand.as_slice());
    assert_eq!(session.dealer_hand.len(), 2);
    assert_eq!(session.deck.len(), DECK_SIZE - 4);
    // The face-up card is the second-dealt dealer card; the hole card stays hidden.
    assert_eq!(session.dealer_hand.cards()[1], deal.dealer_face_up);
}

#[test]
fn rejoin_continues_the_partially_drawn_deck() {
    let table = free_table();
    table.start_session(1, 0.0).unwrap();

    set_deck_from_draws(
        &table,
        1,
        &[
            "2 of hearts",  // player
            "5 of clubs",   // player
            "9 of diamonds", // dealer hole
            "K of spades",  // dealer face-up
            "3 of clubs",   // left in the deck
        ],
    );

    let deal = table.start_session(1, 0.0).unwrap();

    assert_eq!(deal.player_hand, vec![card("2 of hearts"), card("5 of clubs")]);
    assert_eq!(deal.dealer_face_up, card("K of spades"));

    let sessions = table.sessions.lock().unwrap();
    let session = sessions.get(&1).unwrap();
    assert_eq!(
        session.dealer_hand.cards(),
        &[card("9 of diamonds"), card("K of spades")]
    );
    assert_eq!(session.deck.len(), 1);
}

#[test]
fn rejoin_redeal_fails_when_the_deck_is_down_to_three_cards() {
    let table = free_table();
    table.start_session(1, 0.0).unwrap();
    set_deck_from_draws(&table, 1, &["2 of hearts", "5 of clubs", "9 of diamonds"]);

    assert_eq!(
        table.start_session(1, 0.0).unwrap_err(),
        StartError::DeckExhausted(1)
    );
}

#[test]
fn rejoin_can_be_rejected() {
    let options = TableOptions::default().with_rejoin(RejoinPolicy::Reject);
    let table = Table::with_seed(InMemoryLedger::new(), options, 42);

    table.start_session(1, 0.0).unwrap();
    assert_eq!(
        table.start_session(1, 0.0).unwrap_err(),
        StartError::SessionExists(1)
    );
}

#[test]
fn fresh_rejoin_restakes_and_reshuffles() {
    let ledger = InMemoryLedger::new();
    ledger.open_account(1, 100.0);
    let options = TableOptions::default().with_rejoin(RejoinPolicy::Fresh);
    let table = Table::with_seed(ledger, options, 42);

    table.start_session(1, 10.0).unwrap();
    assert_eq!(table.ledger().balance(1).unwrap(), 90.0);

    table.start_session(1, 20.0).unwrap();
    assert_eq!(table.ledger().balance(1).unwrap(), 70.0);

    let sessions = table.sessions.lock().unwrap();
    let session = sessions.get(&1).unwrap();
    assert_eq!(session.wager, 20.0);
    assert_eq!(session.deck.len(), DECK_SIZE - 4);
}

#[test]
fn hit_appends_to_the_named_hand() {
    let table = free_table();
    table.start_session(1, 0.0).unwrap();

    let drawn = table.draw_for(1, Role::Player).unwrap();

    let sessions = table.sessions.lock().unwrap();
    let session = sessions.get(&1).unwrap();
    assert_eq!(session.player_hand.len(), 3);
    assert_eq!(session.player_hand.cards()[2], drawn);
    assert_eq!(session.dealer_hand.len(), 2);
    assert_eq!(session.deck.len(), DECK_SIZE - 5);
}

#[test]
fn hit_without_a_session_fails() {
    let table = free_table();
    assert_eq!(
        table.draw_for(9, Role::Player).unwrap_err(),
        DrawError::SessionNotFound(9)
    );
}

#[test]
fn hit_on_an_exhausted_deck_leaves_the_hand_untouched() {
    let table = free_table();
    table.start_session(1, 0.0).unwrap();
    set_deck_from_draws(&table, 1, &[]);

    assert_eq!(
        table.draw_for(1, Role::Dealer).unwrap_err(),
        DrawError::EmptyDeck(1)
    );

    let sessions = table.sessions.lock().unwrap();
    assert_eq!(sessions.get(&1).unwrap().dealer_hand.len(), 2);
}

#[test]
fn dealer_stands_on_hard_17() {
    let table = free_table();
    table.start_session(1, 0.0).unwrap();
    set_hands(&table, 1, &["9 of hearts", "9 of clubs"], &["10 of hearts", "7 of clubs"]);
    set_deck_from_draws(&table, 1, &["4 of spades"]);

    let final_hand = table.play_dealer_turn(1).unwrap();
    assert_eq!(final_hand.len(), 2);

    let sessions = table.sessions.lock().unwrap();
    assert_eq!(sessions.get(&1).unwrap().deck.len(), 1);
}

#[test]
fn dealer_stands_on_soft_17() {
    let table = free_table();
    table.start_session(1, 0.0).unwrap();
    set_hands(&table, 1, &["9 of hearts", "9 of clubs"], &["A of spades", "6 of hearts"]);
    set_deck_from_draws(&table, 1, &["4 of spades"]);

    let final_hand = table.play_dealer_turn(1).unwrap();
    assert_eq!(final_hand.len(), 2);
    assert_eq!(table.hand_value(1, Role::Dealer).unwrap().total, 17);
}

#[test]
fn dealer_hits_16_and_reevaluates() {
    let table = free_table();
    table.start_session(1, 0.0).unwrap();
    set_hands(&table, 1, &["9 of hearts", "9 of clubs"], &["10 of hearts", "6 of clubs"]);
    set_deck_from_draws(&table, 1, &["5 of diamonds", "8 of spades"]);

    let final_hand = table.play_dealer_turn(1).unwrap();

    // One draw takes the dealer from 16 to 21; the second rigged card stays.
    assert_eq!(
        final_hand,
        vec![card("10 of hearts"), card("6 of clubs"), card("5 of diamonds")]
    );
    assert_eq!(table.hand_value(1, Role::Dealer).unwrap().total, 21);
}

#[test]
fn dealer_turn_surfaces_an_exhausted_deck() {
    let table = free_table();
    table.start_session(1, 0.0).unwrap();
    set_hands(&table, 1, &["9 of hearts", "9 of clubs"], &["2 of hearts", "3 of clubs"]);
    set_deck_from_draws(&table, 1, &[]);

    assert_eq!(table.play_dealer_turn(1).unwrap_err(), TurnError::EmptyDeck(1));
}

#[test]
fn player_bust_takes_precedence() {
    let player = hand(&["10 of hearts", "5 of spades", "8 of clubs"]);
    let busted_dealer = hand(&["K of clubs", "6 of diamonds", "Q of spades"]);

    let settlement = resolve(&player, &busted_dealer, 10.0, false);
    assert_eq!(settlement.outcome, Outcome::PlayerBust);
    assert_eq!(settlement.amount, -10.0);
}

#[test]
fn dealer_bust_pays_double() {
    let player = hand(&["10 of hearts", "8 of spades"]);
    let dealer = hand(&["K of clubs", "6 of diamonds", "Q of spades"]);

    let settlement = resolve(&player, &dealer, 10.0, false);
    assert_eq!(settlement.outcome, Outcome::DealerBust);
    assert_eq!(settlement.amount, 20.0);
}

#[test]
fn player_blackjack_pays_two_and_a_half() {
    let player = hand(&["10 of hearts", "A of spades"]);
    let dealer = hand(&["10 of clubs", "9 of diamonds"]);

    let settlement = resolve(&player, &dealer, 10.0, false);
    assert_eq!(settlement.outcome, Outcome::PlayerBlackjack);
    assert_eq!(settlement.amount, 25.0);
}

#[test]
fn three_card_21_is_not_a_blackjack() {
    let player = hand(&["7 of hearts", "7 of spades", "7 of clubs"]);
    let dealer = hand(&["K of clubs", "Q of diamonds"]);

    let settlement = resolve(&player, &dealer, 10.0, false);
    assert_eq!(settlement.outcome, Outcome::PlayerWin);
    assert_eq!(settlement.amount, 20.0);
}

#[test]
fn dealer_blackjack_beats_a_plain_19() {
    let player = hand(&["10 of hearts", "9 of spades"]);
    let dealer = hand(&["A of clubs", "K of diamonds"]);

    let settlement = resolve(&player, &dealer, 10.0, false);
    assert_eq!(settlement.outcome, Outcome::DealerBlackjack);
    assert_eq!(settlement.amount, -10.0);
}

#[test]
fn dealer_win_and_tie() {
    let fifteen = hand(&["10 of hearts", "5 of spades"]);
    let twenty = hand(&["K of clubs", "Q of diamonds"]);

    let settlement = resolve(&fifteen, &twenty, 10.0, false);
    assert_eq!(settlement.outcome, Outcome::DealerWin);
    assert_eq!(settlement.amount, -10.0);

    let eighteen_a = hand(&["10 of hearts", "8 of spades"]);
    let eighteen_b = hand(&["9 of clubs", "9 of diamonds"]);

    let settlement = resolve(&eighteen_a, &eighteen_b, 10.0, false);
    assert_eq!(settlement.outcome, Outcome::Tie);
    assert_eq!(settlement.amount, 0.0);
}

#[test]
fn double_blackjack_follows_the_table_rule() {
    let player = hand(&["A of spades", "K of hearts"]);
    let dealer = hand(&["A of clubs", "Q of diamonds"]);

    // Checked order: the player's natural is checked first and wins.
    let checked = resolve(&player, &dealer, 10.0, false);
    assert_eq!(checked.outcome, Outcome::PlayerBlackjack);
    assert_eq!(checked.amount, 25.0);

    let pushed = resolve(&player, &dealer, 10.0, true);
    assert_eq!(pushed.outcome, Outcome::Tie);
    assert_eq!(pushed.amount, 0.0);
}

#[test]
fn check_status_uses_the_session_wager() {
    let table = funded_table(1, 100.0);
    table.start_session(1, 30.0).unwrap();
    set_hands(&table, 1, &["10 of hearts", "A of spades"], &["10 of clubs", "9 of diamonds"]);

    let settlement = table.check_status(1).unwrap();
    assert_eq!(settlement.outcome, Outcome::PlayerBlackjack);
    assert_eq!(settlement.amount, 75.0);

    // check_status is pure and repeatable.
    assert_eq!(table.check_status(1).unwrap(), settlement);
    assert_eq!(
        table.check_status(9).unwrap_err(),
        StatusError::SessionNotFound(9)
    );
}

#[test]
fn starting_a_wagered_session_debits_the_ledger() {
    let table = funded_table(1, 100.0);
    table.start_session(1, 30.0).unwrap();
    assert_eq!(table.ledger().balance(1).unwrap(), 70.0);
}

#[test]
fn insufficient_funds_leaves_no_session_behind() {
    let table = funded_table(1, 20.0);

    assert_eq!(
        table.start_session(1, 50.0).unwrap_err(),
        StartError::InsufficientFunds(1)
    );
    assert!(table.sessions.lock().unwrap().is_empty());
    assert_eq!(table.ledger().balance(1).unwrap(), 20.0);
}

#[test]
fn unknown_account_surfaces_the_ledger_error() {
    let table = free_table();
    assert_eq!(
        table.start_session(1, 10.0).unwrap_err(),
        StartError::Ledger(LedgerError::UnknownAccount(1))
    );
}

#[test]
fn negative_wagers_are_rejected() {
    let table = funded_table(1, 100.0);
    assert_eq!(
        table.start_session(1, -5.0).unwrap_err(),
        StartError::InvalidWager
    );
}

#[test]
fn settle_credits_wins_and_latches() {
    let table = funded_table(1, 100.0);
    table.start_session(1, 10.0).unwrap();
    set_hands(&table, 1, &["10 of hearts", "9 of spades"], &["10 of clubs", "7 of diamonds"]);

    let settlement = table.settle(1).unwrap();
    assert_eq!(settlement.outcome, Outcome::PlayerWin);
    assert_eq!(settlement.amount, 20.0);
    assert_eq!(table.ledger().balance(1).unwrap(), 110.0);

    // A second settle must not credit again.
    assert_eq!(table.settle(1).unwrap_err(), SettleError::AlreadySettled(1));
    assert_eq!(table.ledger().balance(1).unwrap(), 110.0);
}

#[test]
fn settle_on_a_loss_moves_no_money() {
    let table = funded_table(1, 100.0);
    table.start_session(1, 10.0).unwrap();
    set_hands(&table, 1, &["10 of hearts", "5 of spades"], &["10 of clubs", "K of diamonds"]);

    let settlement = table.settle(1).unwrap();
    assert_eq!(settlement.outcome, Outcome::DealerWin);
    assert_eq!(settlement.amount, -10.0);
    assert_eq!(table.ledger().balance(1).unwrap(), 90.0);
}

#[test]
fn redeal_clears_the_settle_latch() {
    let table = funded_table(1, 100.0);
    table.start_session(1, 10.0).unwrap();
    table.settle(1).unwrap();

    table.start_session(1, 0.0).unwrap();
    assert!(table.settle(1).is_ok());
}

#[test]
fn reset_installs_a_fresh_session_every_time() {
    let table = funded_table(1, 100.0);
    table.start_session(1, 30.0).unwrap();
    table.draw_for(1, Role::Player).unwrap();

    for _ in 0..2 {
        table.reset(1);

        let sessions = table.sessions.lock().unwrap();
        let session = sessions.get(&1).unwrap();
        assert_eq!(session.deck.len(), DECK_SIZE);
        assert!(session.player_hand.is_empty());
        assert!(session.dealer_hand.is_empty());
        assert_eq!(session.wager, 0.0);
    }

    // The ledger keeps whatever the start debited; reset never touches it.
    assert_eq!(table.ledger().balance(1).unwrap(), 70.0);
}

#[test]
fn sessions_are_isolated_per_player() {
    let table = free_table();
    table.start_session(1, 0.0).unwrap();
    table.start_session(2, 0.0).unwrap();

    for _ in 0..3 {
        table.draw_for(1, Role::Player).unwrap();
    }
    table.reset(1);

    let sessions = table.sessions.lock().unwrap();
    let other = sessions.get(&2).unwrap();
    assert_eq!(other.player_hand.len(), 2);
    assert_eq!(other.dealer_hand.len(), 2);
    assert_eq!(other.deck.len(), DECK_SIZE - 4);
}

#[test]
fn hand_value_reads_the_named_seat() {
    let table = free_table();
    table.start_session(1, 0.0).unwrap();
    set_hands(&table, 1, &["A of spades", "K of hearts"], &["9 of clubs", "9 of diamonds"]);

    let player = table.hand_value(1, Role::Player).unwrap();
    assert_eq!(player.total, 21);
    assert!(player.soft);

    let dealer = table.hand_value(1, Role::Dealer).unwrap();
    assert_eq!(dealer.total, 18);
    assert!(!dealer.soft);

    assert_eq!(
        table.hand_value(9, Role::Player).unwrap_err(),
        StatusError::SessionNotFound(9)
    );
}
