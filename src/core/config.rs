//! Game configuration.
//!
//! Everything that stays fixed for the lifetime of a game lives here:
//! board geometry, the die, fees, payout tables, bet supply limits and the
//! trap/stack policy. `GameState` never stores any of it; the engine and
//! the rules receive the config explicitly.
//!
//! Defaults follow the published board-game rules.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest camel count whose ids all fit a `CamelId`.
pub const MAX_CAMELS: usize = u8::MAX as usize;

/// What happens to camels riding on a camel that lands on a trap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrapStackPolicy {
    /// Riders stay on the landing camel and take the trap effect with it.
    #[default]
    CarryStack,
    /// Only the landing camel takes the trap effect; riders stop on the
    /// trap cell.
    LandingCamelOnly,
}

/// Complete, immutable game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of camels racing.
    pub camel_count: usize,

    /// Number of cells. The final cell is `board_size - 1`; a camel whose
    /// position exceeds it ends the game.
    pub board_size: usize,

    /// Lowest die face.
    pub die_min: u8,

    /// Highest die face.
    pub die_max: u8,

    /// Coins every player starts with.
    pub starting_coins: i64,

    /// Paid to the player who moves a camel.
    pub move_fee: i64,

    /// Paid to a trap's owner when a camel lands on it.
    pub trap_fee: i64,

    /// Extra distance a trap adds (forward) or takes away (backward).
    pub trap_offset: usize,

    /// How riders behave when the camel under them lands on a trap.
    pub trap_stack_policy: TrapStackPolicy,

    /// Round-bet tiles available per camel each round, in the order they
    /// are taken. The length is the per-camel supply.
    pub round_bet_tiles: Vec<i64>,

    /// Paid for a round bet on the camel in second place.
    pub round_second_payout: i64,

    /// Paid for any other round bet.
    pub round_wrong_payout: i64,

    /// Paid to correct game bets in placement order. Bets past the end
    /// of the table get the last entry.
    pub game_bet_payouts: Vec<i64>,

    /// Paid for an incorrect game bet.
    pub game_wrong_payout: i64,

    /// How many game bets a single player may place on one camel
    /// (winner and loser combined). `None` is unlimited.
    pub game_bets_per_player_per_camel: Option<usize>,

    /// How many game bets all players together may place on one camel.
    /// `None` is unlimited.
    pub game_bets_per_camel: Option<usize>,

    /// Whether traps go back to their owners when a round ends.
    pub clear_traps_each_round: bool,

    /// Whether coin balances may drop below zero.
    pub allow_negative_coins: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            camel_count: 5,
            board_size: 16,
            die_min: 1,
            die_max: 3,
            starting_coins: 3,
            move_fee: 1,
            trap_fee: 1,
            trap_offset: 1,
            trap_stack_policy: TrapStackPolicy::CarryStack,
            round_bet_tiles: vec![5, 3, 2],
            round_second_payout: 1,
            round_wrong_payout: -1,
            game_bet_payouts: vec![8, 5, 3, 2, 1],
            game_wrong_payout: -1,
            game_bets_per_player_per_camel: Some(1),
            game_bets_per_camel: None,
            clear_traps_each_round: true,
            allow_negative_coins: false,
        }
    }
}

impl GameConfig {
    /// Create a config with the standard rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a config from JSON text. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: &str| Err(Error::InvalidConfig(reason.to_string()));

        if self.camel_count == 0 || self.camel_count > MAX_CAMELS {
            return fail("camel_count must be between 1 and 255");
        }
        if self.board_size < 2 {
            return fail("board_size must be at least 2");
        }
        if self.die_min == 0 || self.die_min > self.die_max {
            return fail("die faces must satisfy 1 <= die_min <= die_max");
        }
        // Setup puts camels on `roll - 1`; none may start past the final cell.
        if usize::from(self.die_max) > self.final_cell() {
            return fail("die_max must be smaller than board_size");
        }
        if self.game_bet_payouts.is_empty() {
            return fail("game_bet_payouts must not be empty");
        }
        if self.round_bet_tiles.windows(2).any(|w| w[0] < w[1]) {
            return fail("round_bet_tiles must be non-increasing");
        }
        Ok(())
    }

    /// Die faces as a range.
    #[must_use]
    pub fn die(&self) -> RangeInclusive<u8> {
        self.die_min..=self.die_max
    }

    /// Index of the final cell.
    #[must_use]
    pub fn final_cell(&self) -> usize {
        self.board_size - 1
    }

    /// Round-bet supply per camel per round.
    #[must_use]
    pub fn round_bet_supply(&self) -> usize {
        self.round_bet_tiles.len()
    }

    /// Payout for the `rank`-th (0-based) correct game bet.
    #[must_use]
    pub fn game_bet_payout(&self, rank: usize) -> i64 {
        self.game_bet_payouts
            .get(rank)
            .or_else(|| self.game_bet_payouts.last())
            .copied()
            .unwrap_or(0)
    }

    /// Set the number of camels.
    #[must_use]
    pub fn with_camel_count(mut self, count: usize) -> Self {
        self.camel_count = count;
        self
    }

    /// Set the number of cells.
    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Set the lowest and highest die face.
    #[must_use]
    pub fn with_die(mut self, min: u8, max: u8) -> Self {
        self.die_min = min;
        self.die_max = max;
        self
    }

    /// Set every player's opening balance.
    #[must_use]
    pub fn with_starting_coins(mut self, coins: i64) -> Self {
        self.starting_coins = coins;
        self
    }

    /// Set the coins earned for moving a camel and for a sprung trap.
    #[must_use]
    pub fn with_fees(mut self, move_fee: i64, trap_fee: i64) -> Self {
        self.move_fee = move_fee;
        self.trap_fee = trap_fee;
        self
    }

    /// Set how far a trap pushes a camel.
    #[must_use]
    pub fn with_trap_offset(mut self, offset: usize) -> Self {
        self.trap_offset = offset;
        self
    }

    /// Set whether riders follow a trapped camel.
    #[must_use]
    pub fn with_trap_stack_policy(mut self, policy: TrapStackPolicy) -> Self {
        self.trap_stack_policy = policy;
        self
    }

    /// Set the round-bet tiles per camel, highest first.
    #[must_use]
    pub fn with_round_bet_tiles(mut self, tiles: Vec<i64>) -> Self {
        self.round_bet_tiles = tiles;
        self
    }

    /// Set the round-bet payouts for second place and for a wrong bet.
    #[must_use]
    pub fn with_round_payouts(mut self, second: i64, wrong: i64) -> Self {
        self.round_second_payout = second;
        self.round_wrong_payout = wrong;
        self
    }

    /// Set the game-bet payout table and the wrong-bet payout.
    #[must_use]
    pub fn with_game_bet_payouts(mut self, payouts: Vec<i64>, wrong: i64) -> Self {
        self.game_bet_payouts = payouts;
        self.game_wrong_payout = wrong;
        self
    }

    /// Set the game-bet caps per player per camel and per camel. `None` is unlimited.
    #[must_use]
    pub fn with_game_bet_limits(
        mut self,
        per_player_per_camel: Option<usize>,
        per_camel: Option<usize>,
    ) -> Self {
        self.game_bets_per_player_per_camel = per_player_per_camel;
        self.game_bets_per_camel = per_camel;
        self
    }

    /// Set whether traps are returned at round end.
    #[must_use]
    pub fn with_clear_traps_each_round(mut self, clear: bool) -> Self {
        self.clear_traps_each_round = clear;
        self
    }

    /// Allow balances below zero.
    #[must_use]
    pub fn with_negative_coins(mut self, allow: bool) -> Self {
        self.allow_negative_coins = allow;
        self
    }
}
