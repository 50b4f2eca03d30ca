//! Camels and their place on the board.

use serde::{Deserialize, Serialize};

/// Camel identifier, `0..camel_count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CamelId(pub u8);

impl CamelId {
    /// Create a camel id.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the id as a `Vec` index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Every camel of a `camel_count` race.
    pub fn all(camel_count: usize) -> impl Iterator<Item = CamelId> {
        (0..camel_count as u8).map(CamelId)
    }
}

impl std::fmt::Display for CamelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Camel {}", self.0)
    }
}

/// A camel's cell and its height in that cell's stack (0 = bottom).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camel {
    pub id: CamelId,
    pub position: usize,
    pub stack: usize,
}

impl Camel {
    /// Create a camel at `position`, `stack` high.
    #[must_use]
    pub fn new(id: CamelId, position: usize, stack: usize) -> Self {
        Self { id, position, stack }
    }

    /// Race order key: further along wins, higher in the stack breaks ties.
    #[must_use]
    pub fn race_key(&self) -> (usize, usize) {
        (self.position, self.stack)
    }
}
