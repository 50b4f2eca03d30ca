//! Game engine: the turn loop, camel movement and bet settlement.

pub mod game;
pub mod movement;
pub mod settlement;

pub use game::{GameEngine, GameOutcome, Phase, TurnRecord};
pub use movement::{advance, CamelMove};
pub use settlement::{settle_game, settle_round, Payout};
