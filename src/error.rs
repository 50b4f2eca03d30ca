//! Error type shared by the engine, the game log and the simulation runner.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::{Action, PlayerId};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A bot chose an action outside the legal set.
    #[error("{player} chose illegal action {action}")]
    IllegalMove { player: PlayerId, action: Action },

    /// A bot returned an action that does not fit the board or camel set.
    #[error("{player} returned malformed action {action}: {reason}")]
    MalformedAction {
        player: PlayerId,
        action: Action,
        reason: String,
    },

    #[error("game is over")]
    GameOver,

    #[error("game abandoned after {turns} turns")]
    TurnLimit { turns: usize },

    #[error("unknown bot `{0}`")]
    UnknownBot(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two game logs being concatenated disagree on their header.
    #[error("header of {path} does not match the first log")]
    HeaderMismatch { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
