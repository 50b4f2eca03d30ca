//! Legal action enumeration and validation.
//!
//! The rules engine never mutates state. The game engine asks it twice
//! per turn: once for the menu handed to the bot, and once, against the
//! same unmutated state, to check the bot's answer.

use std::sync::Arc;

use crate::core::{Action, BetKind, CamelId, GameConfig, GameState, PlayerId, TrapKind};
use crate::error::{Error, Result};

/// Camel Up rules for one configuration.
#[derive(Clone, Debug)]
pub struct RulesEngine {
    config: Arc<GameConfig>,
}

impl RulesEngine {
    /// Create a rules engine for `config`.
    #[must_use]
    pub fn new(config: Arc<GameConfig>) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shared handle to the configuration.
    #[must_use]
    pub fn config_arc(&self) -> Arc<GameConfig> {
        Arc::clone(&self.config)
    }

    /// Every action `player` may take in `state`.
    ///
    /// Turn order is not checked here; the engine only asks for the
    /// active player. Returns an empty list once the game is over.
    #[must_use]
    pub fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        if !state.game_active {
            return Vec::new();
        }

        let mut actions = Vec::new();

        if !state.all_moved() {
            actions.push(Action::MoveCamel);
        }

        self.trap_actions(state, &mut actions);
        self.round_bet_actions(state, &mut actions);
        self.game_bet_actions(state, player, &mut actions);

        actions
    }

    /// Whether `action` is currently legal for `player`.
    #[must_use]
    pub fn is_legal(&self, state: &GameState, player: PlayerId, action: &Action) -> bool {
        self.legal_actions(state, player).contains(action)
    }

    /// Check a bot's answer against the current state.
    ///
    /// Actions that name a camel or cell that does not exist are
    /// `MalformedAction`; well-formed actions outside the legal set are
    /// `IllegalMove`.
    pub fn validate(&self, state: &GameState, player: PlayerId, action: &Action) -> Result<()> {
        if !state.game_active {
            return Err(Error::GameOver);
        }

        if let Some(reason) = self.malformed(action) {
            return Err(Error::MalformedAction {
                player,
                action: *action,
                reason,
            });
        }

        if !self.is_legal(state, player, action) {
            return Err(Error::IllegalMove {
                player,
                action: *action,
            });
        }

        Ok(())
    }

    fn malformed(&self, action: &Action) -> Option<String> {
        match action {
            Action::MoveCamel => None,
            Action::PlaceTrap { position, .. } if *position >= self.config.board_size => Some(
                format!("cell {} is off a {}-cell board", position, self.config.board_size),
            ),
            Action::PlaceTrap { .. } => None,
            Action::RoundBet { camel } | Action::GameBet { camel, .. } => {
                (camel.index() >= self.config.camel_count).then(|| {
                    format!("{} does not exist in a {}-camel race", camel, self.config.camel_count)
                })
            }
        }
    }

    fn trap_actions(&self, state: &GameState, out: &mut Vec<Action>) {
        for position in 0..self.config.board_size {
            // Cells holding any trap are out: another player's blocks the
            // cell, and the player's own cannot move onto itself.
            if state.trap_at(position).is_some() {
                continue;
            }
            for kind in TrapKind::ALL {
                out.push(Action::PlaceTrap { kind, position });
            }
        }
    }

    fn round_bet_actions(&self, state: &GameState, out: &mut Vec<Action>) {
        let supply = self.config.round_bet_supply();
        out.extend(
            CamelId::all(self.config.camel_count)
                .filter(|&camel| state.round_bets_on(camel) < supply)
                .map(|camel| Action::RoundBet { camel }),
        );
    }

    fn game_bet_actions(&self, state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
        for camel in CamelId::all(self.config.camel_count) {
            let per_player_ok = self
                .config
                .game_bets_per_player_per_camel
                .map_or(true, |limit| state.game_bets_by(player, camel) < limit);
            let per_camel_ok = self
                .config
                .game_bets_per_camel
                .map_or(true, |limit| state.game_bets_on(camel) < limit);

            if per_player_ok && per_camel_ok {
                for kind in BetKind::ALL {
                    out.push(Action::GameBet { kind, camel });
                }
            }
        }
    }
}
