//! Core types: players, camels, configuration, actions, state, views, RNG.
//!
//! Everything here is plain data plus the board bookkeeping that keeps
//! camel stacks consistent. Turn sequencing lives in `engine`, legality in
//! `rules`.

pub mod action;
pub mod camel;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;
pub mod view;

pub use action::{Action, ActionRecord};
pub use camel::{Camel, CamelId};
pub use config::{GameConfig, TrapStackPolicy};
pub use player::{PlayerId, PlayerMap, PlayerState};
pub use rng::GameRng;
pub use state::{ranking, BetKind, GameBet, GameState, RoundBet, Stack, Trap, TrapKind};
pub use view::{GameBetView, PlayerView};
