//! Rules engine: what a player may do in a given state.
//!
//! `RulesEngine::legal_actions` is the single authority on legality. The
//! game engine never applies an action the rules engine has not approved.

pub mod engine;

pub use engine::RulesEngine;
