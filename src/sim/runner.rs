use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::bots;
use crate::core::{GameConfig, GameRng, PlayerId, PlayerMap};
use crate::engine::{GameEngine, GameOutcome};
use crate::error::{Error, Result};
use crate::gamelog::{self, GameLogWriter};

/// Settings for a batch of games.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Number of games to play.
    pub games: usize,

    /// Bot identifiers in seat order.
    pub bots: Vec<String>,

    /// Game `i` is seeded with `seed + i`.
    pub seed: u64,

    /// Directory for per-game logs. `None` disables logging to disk.
    pub output_dir: Option<PathBuf>,

    /// Rules every game is played under.
    pub game: GameConfig,

    /// Run games on the rayon thread pool.
    pub parallel: bool,

    /// Actions after which a game is abandoned.
    pub turn_limit: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: 1,
            bots: vec!["random".to_string(), "random".to_string()],
            seed: 0,
            output_dir: None,
            game: GameConfig::default(),
            parallel: false,
            turn_limit: 10_000,
        }
    }
}

impl SimulationConfig {
    /// Create a config: one game between two random bots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of games.
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    /// Set the bot identifiers, in seat order.
    pub fn with_bots<S: Into<String>>(mut self, bots: impl IntoIterator<Item = S>) -> Self {
        self.bots = bots.into_iter().map(Into::into).collect();
        self
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Write per-game logs into `dir`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the rules for every game.
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Run games on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the action count after which a game is abandoned.
    pub fn with_turn_limit(mut self, limit: usize) -> Self {
        self.turn_limit = limit;
        self
    }

    /// Seed of game `index`.
    pub fn game_seed(&self, index: usize) -> u64 {
        self.seed.wrapping_add(index as u64)
    }

    fn validate(&self) -> Result<()> {
        self.game.validate()?;
        if self.bots.is_empty() {
            return Err(Error::InvalidConfig("at least one bot is required".to_string()));
        }
        for name in &self.bots {
            bots::create(name, 0)?;
        }
        Ok(())
    }
}

/// Result of one game in a batch.
#[derive(Debug)]
pub struct GameReport {
    pub index: usize,
    pub seed: u64,
    pub result: Result<GameOutcome>,
    /// Log written for this game, if logging was enabled.
    pub log: Option<PathBuf>,
}

/// Aggregate over a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationSummary {
    pub completed: usize,
    pub failed: usize,
    /// Games in which each seat finished with the most coins (ties count
    /// for every tied seat).
    pub wins: PlayerMap<usize>,
    /// Coins each seat finished with, summed over completed games.
    pub total_coins: PlayerMap<i64>,
}

impl SimulationSummary {
    /// Aggregate a batch of reports for `player_count` seats.
    #[must_use]
    pub fn from_reports(reports: &[GameReport], player_count: usize) -> Self {
        let mut summary = Self {
            completed: 0,
            failed: 0,
            wins: PlayerMap::with_value(player_count, 0),
            total_coins: PlayerMap::with_value(player_count, 0),
        };

        for report in reports {
            match &report.result {
                Ok(outcome) => {
                    summary.completed += 1;
                    for player in outcome.richest() {
                        summary.wins[player] += 1;
                    }
                    for (player, coins) in outcome.coins.iter() {
                        summary.total_coins[player] += coins;
                    }
                }
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Mean final coins of `player` over completed games.
    #[must_use]
    pub fn mean_coins(&self, player: PlayerId) -> f64 {
        if self.completed == 0 {
            return 0.0;
        }
        self.total_coins[player] as f64 / self.completed as f64
    }
}

/// Play every game of the batch.
///
/// Configuration problems (bad rules, unknown bot, unusable output
/// directory) fail the whole batch up front. Per-game failures are
/// reported in the returned list, which is in game order.
pub fn run_simulation(config: &SimulationConfig) -> Result<Vec<GameReport>> {
    config.validate()?;
    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir)?;
    }

    log::info!(
        "simulating {} games with [{}]",
        config.games,
        config.bots.join(", ")
    );

    let reports: Vec<GameReport> = if config.parallel {
        (0..config.games)
            .into_par_iter()
            .map(|index| play_one(config, index))
            .collect()
    } else {
        (0..config.games).map(|index| play_one(config, index)).collect()
    };

    let failed = reports.iter().filter(|r| r.result.is_err()).count();
    if failed > 0 {
        log::warn!("{} of {} games abandoned", failed, config.games);
    }
    Ok(reports)
}

fn play_one(config: &SimulationConfig, index: usize) -> GameReport {
    let seed = config.game_seed(index);
    let log = config
        .output_dir
        .as_ref()
        .map(|dir| dir.join(gamelog::file_name(index)));

    let result = play_game(config, seed, log.as_deref());
    if let Err(err) = &result {
        log::warn!("game {} (seed {}) abandoned: {}", index, seed, err);
    }

    GameReport {
        index,
        seed,
        result,
        log,
    }
}

fn play_game(config: &SimulationConfig, seed: u64, log: Option<&Path>) -> Result<GameOutcome> {
    let rng = GameRng::new(seed);
    let lineup = bots::lineup(&config.bots, &rng)?;
    let mut engine =
        GameEngine::new(config.game.clone(), lineup, seed)?.with_turn_limit(config.turn_limit);

    match log {
        Some(path) => {
            let mut writer = GameLogWriter::create(
                path,
                config.game.camel_count,
                config.bots.len(),
            )?;
            let outcome = engine.run_with(|turn, state| writer.write_turn(turn, state))?;
            writer.finish()?;
            Ok(outcome)
        }
        None => engine.run(),
    }
}
