use crate::core::{Action, GameRng, PlayerId, PlayerView};

use super::Bot;

/// Moves a camel every turn, or plays a random legal action if it is
/// ever handed a menu without `MoveCamel`.
#[derive(Clone, Debug)]
pub struct MoverBot {
    rng: GameRng,
}

impl MoverBot {
    /// Create a mover bot drawing fallback choices from `rng`.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl Bot for MoverBot {
    fn name(&self) -> &str {
        "mover"
    }

    fn decide(&mut self, _player: PlayerId, _view: &PlayerView, legal: &[Action]) -> Action {
        if legal.contains(&Action::MoveCamel) {
            return Action::MoveCamel;
        }
        self.rng.choose(legal).copied().unwrap_or(Action::MoveCamel)
    }
}
