//! # camel-sim
//!
//! A simulation engine for the board game Camel Up.
//!
//! ## Design Principles
//!
//! 1. **Configuration Over Convention**: board size, camel count, die,
//!    fees, payout tables and bet supply all live in `GameConfig`.
//!
//! 2. **Config and State Apart**: `GameConfig` never changes during a
//!    game; `GameState` holds everything that does. Both are passed
//!    explicitly.
//!
//! 3. **One Authority on Legality**: the game engine validates every bot
//!    answer against `RulesEngine::legal_actions` before applying it.
//!
//! ## Architecture
//!
//! - **Redacted Views**: bots receive a `PlayerView` copy in which other
//!   players' game bets are blanked.
//!
//! - **Deterministic**: a game is fully reproducible from its seed.
//!
//! - **Isolated Games**: nothing mutable is shared between games, so
//!   batches run in parallel with rayon.
//!
//! ## Modules
//!
//! - `core`: players, camels, configuration, actions, state, views, RNG
//! - `rules`: legal action enumeration and validation
//! - `engine`: turn loop, camel movement, bet settlement
//! - `bots`: the `Bot` trait and bundled bots
//! - `gamelog`: per-game CSV logs and their concatenation
//! - `sim`: batch simulation

pub mod bots;
pub mod core;
pub mod engine;
pub mod error;
pub mod gamelog;
pub mod rules;
pub mod sim;

pub use crate::core::{
    Action, ActionRecord, BetKind, Camel, CamelId, GameBet, GameBetView, GameConfig, GameRng,
    GameState, PlayerId, PlayerMap, PlayerState, PlayerView, RoundBet, Trap, TrapKind,
    TrapStackPolicy,
};

pub use crate::bots::{Bot, LeaderBot, MoverBot, RandomBot};
pub use crate::engine::{CamelMove, GameEngine, GameOutcome, Payout, Phase, TurnRecord};
pub use crate::error::{Error, Result};
pub use crate::gamelog::{concat_logs, GameLogWriter};
pub use crate::rules::RulesEngine;
pub use crate::sim::{run_simulation, GameReport, SimulationConfig, SimulationSummary};
