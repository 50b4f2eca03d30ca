//! What a bot gets to see.
//!
//! A `PlayerView` is a fresh copy of the game state built for one player.
//! Game bets placed by anyone else keep their owner but lose their kind
//! and camel. The copy is a data contract only: a bot can do what it likes
//! with it and the real game is unaffected.

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::camel::{Camel, CamelId};
use super::config::GameConfig;
use super::player::{PlayerId, PlayerMap, PlayerState};
use super::state::{ranking, BetKind, GameBet, GameState, RoundBet, Stack};

/// A game bet as seen by one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameBetView {
    pub player: PlayerId,
    /// `None` unless the viewer placed the bet.
    pub kind: Option<BetKind>,
    /// `None` unless the viewer placed the bet.
    pub camel: Option<CamelId>,
}

impl GameBetView {
    fn redact(bet: &GameBet, viewer: PlayerId) -> Self {
        if bet.player == viewer {
            Self {
                player: bet.player,
                kind: Some(bet.kind),
                camel: Some(bet.camel),
            }
        } else {
            Self {
                player: bet.player,
                kind: None,
                camel: None,
            }
        }
    }

    /// Whether the bet was redacted.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.kind.is_none() && self.camel.is_none()
    }
}

/// Redacted game state handed to a bot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerView {
    /// Player this view was built for.
    pub viewer: PlayerId,
    pub config: Arc<GameConfig>,
    pub camels: Vec<Camel>,
    pub players: PlayerMap<PlayerState>,
    pub round_bets: Vector<RoundBet>,
    pub game_bets: Vec<GameBetView>,
    /// Camels that have moved this round, in id order.
    pub moved: Vec<CamelId>,
    pub round: u32,
    pub turn: usize,
    pub active_player: PlayerId,
}

impl PlayerView {
    /// Build `viewer`'s view of `state`.
    #[must_use]
    pub fn new(state: &GameState, config: Arc<GameConfig>, viewer: PlayerId) -> Self {
        let mut moved: Vec<CamelId> = state.moved.iter().copied().collect();
        moved.sort();

        Self {
            viewer,
            config,
            camels: state.camels().to_vec(),
            players: state.players.clone(),
            round_bets: state.round_bets.clone(),
            game_bets: state
                .game_bets
                .iter()
                .map(|bet| GameBetView::redact(bet, viewer))
                .collect(),
            moved,
            round: state.round,
            turn: state.turn,
            active_player: state.active_player,
        }
    }

    /// Camels ordered leader first.
    #[must_use]
    pub fn ranking(&self) -> Vec<CamelId> {
        ranking(&self.camels)
    }

    /// Camels on `position`, bottom first.
    #[must_use]
    pub fn stack_at(&self, position: usize) -> Stack {
        let mut here: Vec<&Camel> = self.camels.iter().filter(|c| c.position == position).collect();
        here.sort_by_key(|c| c.stack);
        here.into_iter().map(|c| c.id).collect()
    }

    /// Value of the next round-bet tile for `camel`, if any are left.
    #[must_use]
    pub fn next_round_tile(&self, camel: CamelId) -> Option<i64> {
        let taken = self.round_bets.iter().filter(|b| b.camel == camel).count();
        self.config.round_bet_tiles.get(taken).copied()
    }

    /// Get the viewer's balance.
    #[must_use]
    pub fn my_coins(&self) -> i64 {
        self.players[self.viewer].coins
    }
}
