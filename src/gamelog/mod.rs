//! Per-game CSV action logs.
//!
//! Every simulated game writes one file: a header, then one row per
//! action with the board, coins and traps as they stand after it.
//! `concat_logs` merges a directory of such files under a single header.

mod concat;
mod writer;

pub use concat::concat_logs;
pub use writer::{header, GameLogWriter};

/// Field separator used by every game log.
pub const DELIMITER: char = ',';

/// File name of game `index` inside an output directory.
#[must_use]
pub fn file_name(index: usize) -> String {
    format!("game_{:05}.csv", index)
}
