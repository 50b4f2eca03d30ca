//! The turn loop.
//!
//! Each call to `GameEngine::play_turn` walks one player through
//! `AwaitingAction → Validating → Applying → CheckRoundEnd → CheckGameEnd`
//! and leaves the engine either waiting on the next player or `Terminal`.
//! A bot answer that fails validation ends the game with that error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bots::Bot;
use crate::core::{
    Action, ActionRecord, CamelId, GameBet, GameConfig, GameRng, GameState, PlayerId, PlayerMap,
    PlayerView, RoundBet, Trap,
};
use crate::error::{Error, Result};
use crate::rules::RulesEngine;

use super::movement::{self, CamelMove};
use super::settlement::{self, Payout};

/// Where the engine is in the turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingAction(PlayerId),
    Validating,
    Applying,
    CheckRoundEnd,
    CheckGameEnd,
    Terminal,
}

/// What one turn did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub record: ActionRecord,

    /// Set for `MoveCamel`.
    pub camel_move: Option<CamelMove>,

    /// Set for `PlaceTrap`: the trap as it now stands.
    pub trap: Option<Trap>,

    /// Whether a `PlaceTrap` relocated an existing trap.
    pub trap_moved: bool,

    /// Set for `RoundBet`: the tile taken.
    pub round_tile: Option<i64>,

    pub round_ended: bool,

    pub game_ended: bool,

    /// Bet payouts resolved at the end of this turn.
    pub payouts: Vec<Payout>,
}

impl TurnRecord {
    fn new(record: ActionRecord) -> Self {
        Self {
            record,
            camel_move: None,
            trap: None,
            trap_moved: false,
            round_tile: None,
            round_ended: false,
            game_ended: false,
            payouts: Vec::new(),
        }
    }

    /// Camel the action concerned: the camel moved, or the camel bet on.
    #[must_use]
    pub fn camel(&self) -> Option<CamelId> {
        self.camel_move
            .as_ref()
            .map(|m| m.camel)
            .or_else(|| self.record.action.camel())
    }
}

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub coins: PlayerMap<i64>,
    pub winner: CamelId,
    pub loser: CamelId,
    pub rounds: u32,
    pub turns: usize,
}

impl GameOutcome {
    /// Players with the most coins.
    #[must_use]
    pub fn richest(&self) -> Vec<PlayerId> {
        let best = self.coins.iter().map(|(_, &c)| c).max().unwrap_or(0);
        self.coins
            .iter()
            .filter(|(_, &c)| c == best)
            .map(|(p, _)| p)
            .collect()
    }
}

/// Runs one game between a table of bots.
pub struct GameEngine {
    rules: RulesEngine,
    state: GameState,
    rng: GameRng,
    bots: Vec<Box<dyn Bot>>,
    phase: Phase,
    turn_limit: Option<usize>,
}

impl GameEngine {
    /// Set up a new game. Camels are placed with the engine's RNG.
    pub fn new(config: GameConfig, bots: Vec<Box<dyn Bot>>, seed: u64) -> Result<Self> {
        config.validate()?;
        if bots.is_empty() || bots.len() > 255 {
            return Err(Error::InvalidConfig(format!(
                "need 1 to 255 bots, got {}",
                bots.len()
            )));
        }
        let mut rng = GameRng::new(seed);
        let state = GameState::new(&config, bots.len(), &mut rng);
        Ok(Self::assemble(config, state, bots, rng))
    }

    /// Continue from an existing state.
    ///
    /// The state must have been built for the same camel count and board
    /// size as `config`, and seat one bot per player.
    pub fn with_state(
        config: GameConfig,
        state: GameState,
        bots: Vec<Box<dyn Bot>>,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        if bots.len() != state.player_count() {
            return Err(Error::InvalidConfig(format!(
                "{} bots for {} players",
                bots.len(),
                state.player_count()
            )));
        }
        if state.camel_count() != config.camel_count || state.board_size() != config.board_size {
            return Err(Error::InvalidConfig(format!(
                "state has {} camels on {} cells, config has {} on {}",
                state.camel_count(),
                state.board_size(),
                config.camel_count,
                config.board_size
            )));
        }
        Ok(Self::assemble(config, state, bots, GameRng::new(seed)))
    }

    fn assemble(config: GameConfig, state: GameState, bots: Vec<Box<dyn Bot>>, rng: GameRng) -> Self {
        let phase = if state.game_active {
            Phase::AwaitingAction(state.active_player)
        } else {
            Phase::Terminal
        };
        Self {
            rules: RulesEngine::new(Arc::new(config)),
            state,
            rng,
            bots,
            phase,
            turn_limit: None,
        }
    }

    /// Abandon the game with `TurnLimit` once `limit` actions were taken.
    #[must_use]
    pub fn with_turn_limit(mut self, limit: usize) -> Self {
        self.turn_limit = Some(limit);
        self
    }

    /// Get the current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Get the rules in force.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        self.rules.config()
    }

    /// Get the rules engine.
    #[must_use]
    pub fn rules(&self) -> &RulesEngine {
        &self.rules
    }

    /// Get the turn-cycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the game has ended or been abandoned.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    /// The active player's redacted view.
    #[must_use]
    pub fn view_for(&self, player: PlayerId) -> PlayerView {
        PlayerView::new(&self.state, self.rules.config_arc(), player)
    }

    /// Final result, once the game has ended normally.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.state.game_active {
            return None;
        }
        Some(GameOutcome {
            coins: self.state.players.map(|_, p| p.coins),
            winner: self.state.leader(),
            loser: self.state.last_place(),
            rounds: self.state.round,
            turns: self.state.turn,
        })
    }

    /// Play turns until the game ends.
    pub fn run(&mut self) -> Result<GameOutcome> {
        self.run_with(|_, _| Ok(()))
    }

    /// Play turns until the game ends, handing every turn to `observer`
    /// after it has been applied.
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<GameOutcome>
    where
        F: FnMut(&TurnRecord, &GameState) -> Result<()>,
    {
        while !self.is_terminal() {
            let turn = self.play_turn()?;
            observer(&turn, &self.state)?;
        }
        self.outcome().ok_or(Error::GameOver)
    }

    /// Ask the active bot for an action and apply it.
    pub fn play_turn(&mut self) -> Result<TurnRecord> {
        let Phase::AwaitingAction(player) = self.phase else {
            return Err(Error::GameOver);
        };

        if let Some(limit) = self.turn_limit {
            if self.state.turn >= limit {
                self.abandon();
                return Err(Error::TurnLimit { turns: limit });
            }
        }

        let view = self.view_for(player);
        let legal = self.rules.legal_actions(&self.state, player);
        let action = self.bots[player.index()].decide(player, &view, &legal);

        self.phase = Phase::Validating;
        if let Err(err) = self.rules.validate(&self.state, player, &action) {
            log::warn!("{} ({}): {}", player, self.bots[player.index()].name(), err);
            self.abandon();
            return Err(err);
        }

        self.phase = Phase::Applying;
        let mut turn = self.apply(player, action)?;
        log::debug!("turn {}: {} {}", turn.record.index, player, action);

        self.phase = Phase::CheckRoundEnd;
        if self.state.all_moved() {
            turn.round_ended = true;
            turn.payouts.extend(self.end_round());
        }

        self.phase = Phase::CheckGameEnd;
        if self.state.has_finisher() {
            turn.game_ended = true;
            turn.payouts.extend(self.end_game());
            self.phase = Phase::Terminal;
        } else {
            self.state.active_player = player.next(self.state.player_count());
            self.phase = Phase::AwaitingAction(self.state.active_player);
        }

        Ok(turn)
    }

    fn abandon(&mut self) {
        self.phase = Phase::Terminal;
    }

    fn apply(&mut self, player: PlayerId, action: Action) -> Result<TurnRecord> {
        let config = self.rules.config_arc();
        let record = ActionRecord::new(self.state.turn, self.state.round, player, action);
        let mut turn = TurnRecord::new(record.clone());

        match action {
            Action::MoveCamel => {
                let unmoved = self.state.unmoved_camels();
                let Some(&camel) = self.rng.choose(&unmoved) else {
                    return Err(Error::IllegalMove { player, action });
                };
                let roll = self.rng.roll(config.die());
                let camel_move = self.move_camel(camel, roll);
                self.state.pay(player, config.move_fee, config.allow_negative_coins);
                turn.camel_move = Some(camel_move);
            }
            Action::PlaceTrap { kind, position } => {
                let slot = &mut self.state.players[player].trap;
                turn.trap_moved = slot.is_some();
                let trap = Trap::new(player, kind, position);
                *slot = Some(trap);
                turn.trap = Some(trap);
            }
            Action::RoundBet { camel } => {
                let taken = self.state.round_bets_on(camel);
                let Some(&tile) = config.round_bet_tiles.get(taken) else {
                    return Err(Error::IllegalMove { player, action });
                };
                self.state.round_bets.push_back(RoundBet { player, camel, tile });
                turn.round_tile = Some(tile);
            }
            Action::GameBet { kind, camel } => {
                self.state.game_bets.push_back(GameBet { player, kind, camel });
            }
        }

        self.state.turn += 1;
        self.state.history.push_back(record);
        Ok(turn)
    }

    /// Move `camel` by `roll` and mark it as moved this round.
    ///
    /// Public so scenarios can drive exact rolls; does not pay a move fee
    /// or run end-of-round checks.
    pub fn move_camel(&mut self, camel: CamelId, roll: u8) -> CamelMove {
        let camel_move = movement::advance(self.rules.config(), &mut self.state, camel, roll);
        self.state.moved.insert(camel);
        camel_move
    }

    fn end_round(&mut self) -> Vec<Payout> {
        let payouts = settlement::settle_round(self.rules.config(), &mut self.state);
        log::info!(
            "round {} over, {} leads, {} round bets paid",
            self.state.round,
            self.state.leader(),
            payouts.len()
        );

        self.state.moved.clear();
        self.state.round += 1;
        if self.rules.config().clear_traps_each_round {
            for (_, p) in self.state.players.iter_mut() {
                p.trap = None;
            }
        }
        payouts
    }

    fn end_game(&mut self) -> Vec<Payout> {
        let config = self.rules.config_arc();
        let mut payouts = settlement::settle_round(&config, &mut self.state);
        payouts.extend(settlement::settle_game(&config, &mut self.state));

        self.state.round_active = false;
        self.state.game_active = false;
        log::info!(
            "game over after {} turns: {} wins, {} last",
            self.state.turn,
            self.state.leader(),
            self.state.last_place()
        );
        payouts
    }
}
