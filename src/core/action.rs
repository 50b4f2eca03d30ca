//! Actions a player can take on their turn.
//!
//! There are four kinds of action:
//! - move a camel (the engine picks which one and rolls the die)
//! - place a trap, or move the one already on the board
//! - take a round-bet tile for a camel
//! - place a secret game bet on the overall winner or loser
//!
//! Actions are plain data. Whether one is legal in a given state is the
//! rules engine's call.

use serde::{Deserialize, Serialize};

use super::camel::CamelId;
use super::player::PlayerId;
use super::state::{BetKind, TrapKind};

/// A single player decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move a random camel that has not moved this round.
    MoveCamel,
    /// Place a trap, or relocate the player's existing one.
    PlaceTrap { kind: TrapKind, position: usize },
    /// Take the next round-bet tile for `camel`.
    RoundBet { camel: CamelId },
    /// Bet on `camel` finishing first (`Winner`) or last (`Loser`).
    GameBet { kind: BetKind, camel: CamelId },
}

impl Action {
    /// Short name used in logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Action::MoveCamel => "move_camel",
            Action::PlaceTrap { .. } => "trap",
            Action::RoundBet { .. } => "round_bet",
            Action::GameBet { .. } => "game_bet",
        }
    }

    /// Camel named by the action, if any.
    #[must_use]
    pub fn camel(&self) -> Option<CamelId> {
        match self {
            Action::RoundBet { camel } | Action::GameBet { camel, .. } => Some(*camel),
            Action::MoveCamel | Action::PlaceTrap { .. } => None,
        }
    }

    /// Whether this is a round or game bet.
    #[must_use]
    pub fn is_bet(&self) -> bool {
        matches!(self, Action::RoundBet { .. } | Action::GameBet { .. })
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::MoveCamel => write!(f, "move camel"),
            Action::PlaceTrap { kind, position } => write!(f, "trap {} at {}", kind, position),
            Action::RoundBet { camel } => write!(f, "round bet on {}", camel),
            Action::GameBet { kind, camel } => write!(f, "{} bet on {}", kind, camel),
        }
    }
}

/// An applied action with its place in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Monotonic index across the whole game, starting at 0.
    pub index: usize,

    /// Round the action was taken in, starting at 1.
    pub round: u32,

    pub player: PlayerId,

    pub action: Action,
}

impl ActionRecord {
    /// Create a history entry.
    #[must_use]
    pub fn new(index: usize, round: u32, player: PlayerId, action: Action) -> Self {
        Self {
            index,
            round,
            player,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_camel() {
        assert_eq!(Action::MoveCamel.camel(), None);
        assert_eq!(
            Action::RoundBet { camel: CamelId::new(2) }.camel(),
            Some(CamelId::new(2))
        );
        assert_eq!(
            Action::GameBet {
                kind: BetKind::Loser,
                camel: CamelId::new(4)
            }
            .camel(),
            Some(CamelId::new(4))
        );
    }

    #[test]
    fn test_action_display() {
        let trap = Action::PlaceTrap {
            kind: TrapKind::Backward,
            position: 7,
        };
        assert_eq!(trap.to_string(), "trap - at 7");
        assert_eq!(trap.label(), "trap");

        let bet = Action::GameBet {
            kind: BetKind::Winner,
            camel: CamelId::new(1),
        };
        assert_eq!(bet.to_string(), "winner bet on Camel 1");
        assert!(bet.is_bet());
        assert!(!Action::MoveCamel.is_bet());
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(
            3,
            1,
            PlayerId::new(1),
            Action::PlaceTrap {
                kind: TrapKind::Forward,
                position: 4,
            },
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
