use crate::core::{Action, GameRng, PlayerId, PlayerView};

use super::Bot;

/// Picks uniformly among the legal actions.
#[derive(Clone, Debug)]
pub struct RandomBot {
    rng: GameRng,
}

impl RandomBot {
    /// Create a random bot drawing from `rng`.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl Bot for RandomBot {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(&mut self, _player: PlayerId, _view: &PlayerView, legal: &[Action]) -> Action {
        self.rng.choose(legal).copied().unwrap_or(Action::MoveCamel)
    }
}
