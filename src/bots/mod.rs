//! Player bots.
//!
//! A bot sees a redacted `PlayerView` and the list of legal actions, and
//! returns one of them. Anything else ends the game with an error; the
//! engine never repairs a bot's answer.
//!
//! ## Bundled bots
//!
//! - `random`: uniform over the legal actions
//! - `mover`: always moves a camel when it can
//! - `leader`: takes a good round-bet tile on the leader, otherwise moves

mod leader;
mod mover;
mod random;

pub use leader::LeaderBot;
pub use mover::MoverBot;
pub use random::RandomBot;

use crate::core::{Action, GameRng, PlayerId, PlayerView};
use crate::error::{Error, Result};

/// A pluggable decision maker.
pub trait Bot: Send {
    /// Identifier the bot was created under.
    fn name(&self) -> &str;

    /// Choose one of `legal`.
    ///
    /// `legal` is never empty while the game is running.
    fn decide(&mut self, player: PlayerId, view: &PlayerView, legal: &[Action]) -> Action;
}

/// Names accepted by `create`.
pub const BOT_NAMES: [&str; 3] = ["random", "mover", "leader"];

/// Build a bot from its identifier. `seed` feeds bots that use randomness.
pub fn create(name: &str, seed: u64) -> Result<Box<dyn Bot>> {
    let rng = GameRng::new(seed);
    match name {
        "random" => Ok(Box::new(RandomBot::new(rng))),
        "mover" => Ok(Box::new(MoverBot::new(rng))),
        "leader" => Ok(Box::new(LeaderBot::new(rng))),
        other => Err(Error::UnknownBot(other.to_string())),
    }
}

/// Build one bot per name, each with its own seed derived from `rng`.
pub fn lineup(names: &[String], rng: &GameRng) -> Result<Vec<Box<dyn Bot>>> {
    names
        .iter()
        .enumerate()
        .map(|(seat, name)| create(name, rng.for_context(&format!("bot-{}", seat)).seed()))
        .collect()
}
