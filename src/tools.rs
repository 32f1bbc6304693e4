//! The tool surface consumed by an agent dispatcher.
//!
//! An agent runtime (or a CLI loop) forwards structured tool invocations as
//! `(name, arguments)` pairs and expects a structured result back. Six tools
//! are exposed:
//!
//! | name | arguments | result |
//! |---|---|---|
//! | `start_session` | `player_id`, `wager` (optional) | `{player_hand, dealer_face_up}` |
//! | `hit` | `player_id`, `recipient` | `{card}` |
//! | `evaluate_hand` | `player_id`, `recipient` | `{total, soft}` |
//! | `dealer_turn` | `player_id` | `{dealer_hand}` |
//! | `check_status` | `player_id` | `{status, amount}` |
//! | `reset` | `player_id` | `{}` |
//!
//! Cards cross the wire as `"<rank> of <suit>"` strings.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::PlayerId;
use crate::card::Card;
use crate::error::{DrawError, StartError, StatusError, TurnError};
use crate::ledger::Ledger;
use crate::outcome::Outcome;
use crate::table::{ParseRoleError, Role, Table};

/// Errors surfaced to the agent dispatcher.
///
/// Every failure is terminal for that call and leaves session state
/// untouched; nothing is retried internally.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool name matched nothing this engine exposes.
    #[error("unknown tool: {0:?}")]
    UnknownTool(String),
    /// The argument object did not match the tool's schema.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    /// The recipient argument named neither seat of the table.
    #[error("invalid recipient: {0:?}")]
    InvalidRecipient(String),
    /// `start_session` failed.
    #[error(transparent)]
    Start(#[from] StartError),
    /// `hit` failed.
    #[error(transparent)]
    Draw(#[from] DrawError),
    /// `dealer_turn` failed.
    #[error(transparent)]
    Turn(#[from] TurnError),
    /// A session lookup failed.
    #[error(transparent)]
    Status(#[from] StatusError),
    /// The result could not be encoded as JSON.
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ToolError {
    /// A stable snake_case code for the agent wire.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::InvalidArguments(_) => "invalid_arguments",
            Self::InvalidRecipient(_) => "invalid_recipient",
            Self::Start(StartError::InvalidWager) => "invalid_wager",
            Self::Start(StartError::InsufficientFunds(_)) => "insufficient_funds",
            Self::Start(StartError::DeckExhausted(_)) => "deck_exhausted",
            Self::Start(StartError::SessionExists(_)) => "session_exists",
            Self::Start(StartError::Ledger(_)) => "ledger_error",
            Self::Draw(DrawError::SessionNotFound(_))
            | Self::Turn(TurnError::SessionNotFound(_))
            | Self::Status(StatusError::SessionNotFound(_)) => "session_not_found",
            Self::Draw(DrawError::EmptyDeck(_)) | Self::Turn(TurnError::EmptyDeck(_)) => {
                "empty_deck"
            }
            Self::Encode(_) => "internal_error",
        }
    }
}

#[derive(Debug, Deserialize)]
struct StartArgs {
    player_id: PlayerId,
    #[serde(default)]
    wager: f64,
}

#[derive(Debug, Deserialize)]
struct SeatArgs {
    player_id: PlayerId,
    recipient: String,
}

#[derive(Debug, Deserialize)]
struct PlayerArgs {
    player_id: PlayerId,
}

#[derive(Debug, Serialize)]
struct HitResponse {
    card: Card,
}

#[derive(Debug, Serialize)]
struct DealerTurnResponse {
    dealer_hand: Vec<Card>,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: Outcome,
    amount: f64,
}

fn parse_args<T: DeserializeOwned>(arguments: &Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments.clone())
        .map_err(|err| ToolError::InvalidArguments(err.to_string()))
}

fn parse_role(recipient: &str) -> Result<Role, ToolError> {
    recipient
        .parse()
        .map_err(|ParseRoleError(name)| ToolError::InvalidRecipient(name))
}

fn encode<T: Serialize>(value: &T) -> Result<Value, ToolError> {
    Ok(serde_json::to_value(value)?)
}

/// Routes one tool invocation to the table.
///
/// # Errors
///
/// Returns an error for unknown tool names, malformed arguments, or any
/// failure of the underlying operation; see [`ToolError::code`] for the wire
/// taxonomy.
pub fn dispatch<L: Ledger>(
    table: &Table<L>,
    name: &str,
    arguments: &Value,
) -> Result<Value, ToolError> {
    match name {
        "start_session" => {
            let args: StartArgs = parse_args(arguments)?;
            let deal = table.start_session(args.player_id, args.wager)?;
            encode(&deal)
        }
        "hit" => {
            let args: SeatArgs = parse_args(arguments)?;
            let role = parse_role(&args.recipient)?;
            let card = table.draw_for(args.player_id, role)?;
            encode(&HitResponse { card })
        }
        "evaluate_hand" => {
            let args: SeatArgs = parse_args(arguments)?;
            let role = parse_role(&args.recipient)?;
            let value = table.hand_value(args.player_id, role)?;
            encode(&value)
        }
        "dealer_turn" => {
            let args: PlayerArgs = parse_args(arguments)?;
            let dealer_hand = table.play_dealer_turn(args.player_id)?;
            encode(&DealerTurnResponse { dealer_hand })
        }
        "check_status" => {
            let args: PlayerArgs = parse_args(arguments)?;
            let settlement = table.check_status(args.player_id)?;
            encode(&StatusResponse {
                status: settlement.outcome,
                amount: settlement.amount,
            })
        }
        "reset" => {
            let args: PlayerArgs = parse_args(arguments)?;
            table.reset(args.player_id);
            Ok(Value::Object(serde_json::Map::new()))
        }
        other => Err(ToolError::UnknownTool(other.to_owned())),
    }
}
