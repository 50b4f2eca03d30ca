//! Batch simulation: many games, one line-up of bots.
//!
//! Each game owns its state, its bots and its RNG, so games run in
//! parallel without sharing anything mutable. A game that fails (illegal
//! bot move, turn limit, I/O) is reported and the batch carries on.

mod runner;

pub use runner::{run_simulation, GameReport, SimulationConfig, SimulationSummary};
