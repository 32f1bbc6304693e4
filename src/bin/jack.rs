//! Interactive dealer loop driving the agent tool surface end to end.

use std::io::{self, Write};

use serde_json::json;
use tracing_subscriber::EnvFilter;

use pitboss::{InMemoryLedger, Ledger, Table, TableOptions, dispatch};

const STARTING_BALANCE: f64 = 500.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Blackjack table (type 'q' to quit)");

    let table = Table::new(InMemoryLedger::new(), TableOptions::default());

    let Some(player_id) = prompt_u64("Player id: ") else {
        return;
    };
    table.ledger().open_account(player_id, STARTING_BALANCE);

    loop {
        let balance = table.ledger().balance(player_id).unwrap_or(0.0);
        if balance <= 0.0 {
            println!("You are out of money. Game over.");
            break;
        }
        println!("Balance: {balance}");

        let Some(wager) = prompt_u64("Wager (0 for a free hand): ") else {
            break;
        };

        let deal = match dispatch(
            &table,
            "start_session",
            &json!({"player_id": player_id, "wager": wager}),
        ) {
            Ok(value) => value,
            Err(err) => {
                println!("Deal error: {err}");
                continue;
            }
        };
        println!("Your hand: {}", deal["player_hand"]);
        println!("Dealer shows: {}", deal["dealer_face_up"]);

        let busted = play_player_turn(&table, player_id);

        if !busted {
            match dispatch(&table, "dealer_turn", &json!({"player_id": player_id})) {
                Ok(value) => println!("Dealer's hand: {}", value["dealer_hand"]),
                Err(err) => println!("Dealer turn error: {err}"),
            }
        }

        match dispatch(&table, "check_status", &json!({"player_id": player_id})) {
            Ok(value) => println!("Result: {} (amount {})", value["status"], value["amount"]),
            Err(err) => println!("Status error: {err}"),
        }

        match table.settle(player_id) {
            Ok(settlement) => {
                let balance = table.ledger().balance(player_id).unwrap_or(0.0);
                println!("Settled {} — balance {balance}", settlement.outcome);
            }
            Err(err) => println!("Settle error: {err}"),
        }

        match prompt_line("Play again? (y/n): ").as_str() {
            "y" | "yes" => {
                // A reset gives the next round a full deck and a fresh stake.
                if let Err(err) = dispatch(&table, "reset", &json!({"player_id": player_id})) {
                    println!("Reset error: {err}");
                }
            }
            _ => break,
        }
    }
}

/// Runs the hit/stand loop. Returns whether the player busted.
fn play_player_turn(table: &Table<InMemoryLedger>, player_id: u64) -> bool {
    loop {
        match prompt_line("Action (h)it / (s)tand: ").as_str() {
            "h" | "hit" => {
                match dispatch(
                    table,
                    "hit",
                    &json!({"player_id": player_id, "recipient": "player"}),
                ) {
                    Ok(value) => println!("You drew {}", value["card"]),
                    Err(err) => {
                        println!("Hit error: {err}");
                        continue;
                    }
                }

                let Ok(value) = dispatch(
                    table,
                    "evaluate_hand",
                    &json!({"player_id": player_id, "recipient": "player"}),
                ) else {
                    continue;
                };

                let total = value["total"].as_u64().unwrap_or(0);
                let soft = value["soft"].as_bool().unwrap_or(false);
                println!("You have {total}{}", if soft { " (soft)" } else { "" });

                if total > 21 {
                    println!("Bust!");
                    return true;
                }
            }
            "s" | "stand" => return false,
            _ => println!("Unknown action."),
        }
    }
}

fn prompt_line(message: &str) -> String {
    print!("{message}");
    let _ = io::stdout().flush();

    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_lowercase()
}

fn prompt_u64(message: &str) -> Option<u64> {
    loop {
        let line = prompt_line(message);
        if line == "q" || line == "quit" {
            return None;
        }
        match line.parse::<u64>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Enter a number."),
        }
    }
}
