//! Mutable game state.
//!
//! ## Board
//!
//! Each camel records its cell and its height in that cell's stack. Heights
//! in a cell are contiguous from 0 (bottom), so a cell's stack can always
//! be rebuilt by sorting its camels by height.
//!
//! ## Ledgers
//!
//! Round bets and game bets are kept in placement order in `im` vectors:
//! payouts depend on that order, and views cloned every turn share them.
//!
//! ## Configuration
//!
//! Nothing from `GameConfig` is stored here except the board size. The
//! config is passed explicitly to whoever needs it.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::ActionRecord;
use super::camel::{Camel, CamelId};
use super::config::GameConfig;
use super::player::{PlayerId, PlayerMap, PlayerState};
use super::rng::GameRng;

/// Position of a camel that has been lifted and not yet dropped.
const OFF_BOARD: usize = usize::MAX;

/// Camels sharing a cell, bottom first.
pub type Stack = SmallVec<[CamelId; 8]>;

/// Direction a trap pushes a camel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapKind {
    /// `+`: extra distance, camel lands on top.
    Forward,
    /// `-`: pushed back, camel lands underneath.
    Backward,
}

impl TrapKind {
    pub const ALL: [TrapKind; 2] = [TrapKind::Forward, TrapKind::Backward];

    /// Log symbol: `+` or `-`.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            TrapKind::Forward => "+",
            TrapKind::Backward => "-",
        }
    }
}

impl std::fmt::Display for TrapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A trap on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trap {
    pub owner: PlayerId,
    pub kind: TrapKind,
    pub position: usize,
}

impl Trap {
    /// Create a trap.
    #[must_use]
    pub fn new(owner: PlayerId, kind: TrapKind, position: usize) -> Self {
        Self {
            owner,
            kind,
            position,
        }
    }
}

/// Game bet direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetKind {
    Winner,
    Loser,
}

impl BetKind {
    pub const ALL: [BetKind; 2] = [BetKind::Winner, BetKind::Loser];

    /// Lowercase name used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BetKind::Winner => "winner",
            BetKind::Loser => "loser",
        }
    }
}

impl std::fmt::Display for BetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A round-bet tile taken by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundBet {
    pub player: PlayerId,
    pub camel: CamelId,
    /// Face value of the tile, paid if `camel` leads at round end.
    pub tile: i64,
}

/// A secret bet on the overall winner or loser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameBet {
    pub player: PlayerId,
    pub kind: BetKind,
    pub camel: CamelId,
}

/// Order camels by race standing, leader first.
#[must_use]
pub fn ranking(camels: &[Camel]) -> Vec<CamelId> {
    let mut sorted: Vec<&Camel> = camels.iter().collect();
    sorted.sort_by(|a, b| b.race_key().cmp(&a.race_key()));
    sorted.into_iter().map(|c| c.id).collect()
}

/// Full state of one game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    board_size: usize,

    /// Camels indexed by `CamelId`.
    camels: Vec<Camel>,

    pub players: PlayerMap<PlayerState>,

    /// Round bets of the current round, in placement order.
    pub round_bets: Vector<RoundBet>,

    /// Game bets, in placement order.
    pub game_bets: Vector<GameBet>,

    /// Camels that have moved this round.
    pub moved: FxHashSet<CamelId>,

    /// Current round, starting at 1.
    pub round: u32,

    /// Number of actions applied so far.
    pub turn: usize,

    pub active_player: PlayerId,

    pub round_active: bool,

    pub game_active: bool,

    /// Every applied action.
    pub history: Vector<ActionRecord>,
}

impl GameState {
    /// Set up a new game: every camel is placed by a die roll on cell
    /// `roll - 1`, in random order, stacking on whatever is already there.
    pub fn new(config: &GameConfig, player_count: usize, rng: &mut GameRng) -> Self {
        let mut order: Vec<CamelId> = CamelId::all(config.camel_count).collect();
        rng.shuffle(&mut order);

        let layout: Vec<(CamelId, usize)> = order
            .into_iter()
            .map(|camel| (camel, usize::from(rng.roll(config.die()) - 1)))
            .collect();

        Self::with_layout(config, player_count, &layout)
    }

    /// Build a state from an explicit layout. Camels are placed in the
    /// order given, each on top of its cell. Every camel must appear once.
    pub fn with_layout(
        config: &GameConfig,
        player_count: usize,
        layout: &[(CamelId, usize)],
    ) -> Self {
        assert_eq!(
            layout.len(),
            config.camel_count,
            "Layout must place every camel exactly once"
        );

        let mut state = Self {
            board_size: config.board_size,
            camels: CamelId::all(config.camel_count)
                .map(|id| Camel::new(id, OFF_BOARD, 0))
                .collect(),
            players: PlayerMap::new(player_count, |_| {
                PlayerState::with_coins(config.starting_coins)
            }),
            round_bets: Vector::new(),
            game_bets: Vector::new(),
            moved: FxHashSet::default(),
            round: 1,
            turn: 0,
            active_player: PlayerId::new(0),
            round_active: true,
            game_active: true,
            history: Vector::new(),
        };

        let mut placed = FxHashSet::default();
        for &(camel, position) in layout {
            assert!(placed.insert(camel), "{} placed twice", camel);
            let stack = state.stack_at(position).len();
            state.camels[camel.index()] = Camel::new(camel, position, stack);
        }

        state
    }

    /// Get the number of cells.
    #[must_use]
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Get the number of camels.
    #[must_use]
    pub fn camel_count(&self) -> usize {
        self.camels.len()
    }

    /// Get every camel, indexed by id.
    #[must_use]
    pub fn camels(&self) -> &[Camel] {
        &self.camels
    }

    /// Get one camel.
    #[must_use]
    pub fn camel(&self, id: CamelId) -> &Camel {
        &self.camels[id.index()]
    }

    /// Get a player's balance.
    #[must_use]
    pub fn coins(&self, player: PlayerId) -> i64 {
        self.players[player].coins
    }

    // === Board ===

    /// Camels on `position`, bottom first.
    #[must_use]
    pub fn stack_at(&self, position: usize) -> Stack {
        let mut here: SmallVec<[&Camel; 8]> = self
            .camels
            .iter()
            .filter(|c| c.position == position)
            .collect();
        here.sort_by_key(|c| c.stack);
        here.into_iter().map(|c| c.id).collect()
    }

    /// Lift `camel` and everything riding on it off the board.
    ///
    /// Returns the lifted unit, bottom first. Lifted camels belong to no
    /// cell until they are dropped again.
    pub fn lift_unit(&mut self, camel: CamelId) -> Stack {
        let Camel {
            position, stack, ..
        } = *self.camel(camel);
        let unit: Stack = self.stack_at(position).into_iter().skip(stack).collect();
        for &c in &unit {
            self.detach(c);
        }
        unit
    }

    /// Put a lifted unit on top of `position`.
    pub fn drop_on_top(&mut self, unit: &[CamelId], position: usize) {
        let base = self.stack_at(position).len();
        for (offset, &camel) in unit.iter().enumerate() {
            self.camels[camel.index()] = Camel::new(camel, position, base + offset);
        }
    }

    /// Put a lifted unit underneath the camels on `position`.
    pub fn drop_underneath(&mut self, unit: &[CamelId], position: usize) {
        for c in self.camels.iter_mut() {
            if c.position == position {
                c.stack += unit.len();
            }
        }
        for (offset, &camel) in unit.iter().enumerate() {
            self.camels[camel.index()] = Camel::new(camel, position, offset);
        }
    }

    fn detach(&mut self, camel: CamelId) {
        self.camels[camel.index()] = Camel::new(camel, OFF_BOARD, 0);
    }

    /// Camels ordered leader first.
    #[must_use]
    pub fn ranking(&self) -> Vec<CamelId> {
        ranking(&self.camels)
    }

    /// Camel in first place.
    #[must_use]
    pub fn leader(&self) -> CamelId {
        self.ranking()[0]
    }

    /// Camel in last place.
    #[must_use]
    pub fn last_place(&self) -> CamelId {
        self.ranking()[self.camels.len() - 1]
    }

    /// Whether a camel has run past the final cell.
    #[must_use]
    pub fn has_finisher(&self) -> bool {
        self.camels.iter().any(|c| c.position > self.board_size - 1)
    }

    // === Rounds ===

    /// Whether `camel` has moved this round.
    #[must_use]
    pub fn has_moved(&self, camel: CamelId) -> bool {
        self.moved.contains(&camel)
    }

    /// Camels that have not moved this round, in id order.
    #[must_use]
    pub fn unmoved_camels(&self) -> Vec<CamelId> {
        CamelId::all(self.camels.len())
            .filter(|&c| !self.has_moved(c))
            .collect()
    }

    /// Whether every camel has moved this round.
    #[must_use]
    pub fn all_moved(&self) -> bool {
        self.moved.len() == self.camels.len()
    }

    // === Traps ===

    /// The trap on `position`, if any.
    #[must_use]
    pub fn trap_at(&self, position: usize) -> Option<Trap> {
        self.traps().find(|t| t.position == position)
    }

    /// Every trap on the board, in owner order.
    pub fn traps(&self) -> impl Iterator<Item = Trap> + '_ {
        self.players.iter().filter_map(|(_, p)| p.trap)
    }

    // === Bets ===

    /// Round-bet tiles already taken for `camel` this round.
    #[must_use]
    pub fn round_bets_on(&self, camel: CamelId) -> usize {
        self.round_bets.iter().filter(|b| b.camel == camel).count()
    }

    /// Game bets placed on `camel` by anyone.
    #[must_use]
    pub fn game_bets_on(&self, camel: CamelId) -> usize {
        self.game_bets.iter().filter(|b| b.camel == camel).count()
    }

    /// Game bets placed on `camel` by `player`.
    #[must_use]
    pub fn game_bets_by(&self, player: PlayerId, camel: CamelId) -> usize {
        self.game_bets
            .iter()
            .filter(|b| b.player == player && b.camel == camel)
            .count()
    }

    // === Coins ===

    /// Add `amount` to a player's balance, flooring at zero unless
    /// negative balances are allowed.
    pub fn pay(&mut self, player: PlayerId, amount: i64, allow_negative: bool) {
        let coins = &mut self.players[player].coins;
        *coins += amount;
        if !allow_negative && *coins < 0 {
            *coins = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::new().with_camel_count(3)
    }

    fn camel(i: u8) -> CamelId {
        CamelId::new(i)
    }

    #[test]
    fn test_with_layout_stacks_in_order() {
        let state = GameState::with_layout(
            &config(),
            2,
            &[(camel(0), 1), (camel(1), 1), (camel(2), 0)],
        );

        assert_eq!(state.stack_at(1).as_slice(), &[camel(0), camel(1)]);
        assert_eq!(state.camel(camel(1)).stack, 1);
        assert_eq!(state.camel(camel(2)).stack, 0);
        assert_eq!(state.coins(PlayerId::new(1)), 3);
    }

    #[test]
    #[should_panic(expected = "Layout must place every camel exactly once")]
    fn test_with_layout_requires_every_camel() {
        GameState::with_layout(&config(), 2, &[(camel(0), 0)]);
    }

    #[test]
    fn test_new_places_camels_on_die_cells() {
        let config = GameConfig::default();
        let mut rng = GameRng::new(5);
        let state = GameState::new(&config, 4, &mut rng);

        assert_eq!(state.camel_count(), 5);
        for c in state.camels() {
            assert!(c.position <= 2);
        }
        for position in 0..3 {
            let stack = state.stack_at(position);
            for (height, id) in stack.iter().enumerate() {
                assert_eq!(state.camel(*id).stack, height);
            }
        }
    }

    #[test]
    fn test_lift_unit_and_drop_on_top() {
        let mut state = GameState::with_layout(
            &config(),
            2,
            &[(camel(0), 1), (camel(1), 1), (camel(2), 3)],
        );

        let unit = state.lift_unit(camel(0));
        assert_eq!(unit.as_slice(), &[camel(0), camel(1)]);

        state.drop_on_top(&unit, 3);
        assert_eq!(state.stack_at(3).as_slice(), &[camel(2), camel(0), camel(1)]);
        assert!(state.stack_at(1).is_empty());
    }

    #[test]
    fn test_drop_underneath() {
        let mut state = GameState::with_layout(
            &config(),
            2,
            &[(camel(0), 2), (camel(1), 4), (camel(2), 4)],
        );

        let unit = state.lift_unit(camel(0));
        state.drop_underneath(&unit, 4);

        assert_eq!(state.stack_at(4).as_slice(), &[camel(0), camel(1), camel(2)]);
        assert_eq!(state.camel(camel(2)).stack, 2);
    }

    #[test]
    fn test_ranking_uses_stack_for_ties() {
        let state = GameState::with_layout(
            &config(),
            2,
            &[(camel(2), 0), (camel(0), 6), (camel(1), 6)],
        );

        assert_eq!(state.ranking(), vec![camel(1), camel(0), camel(2)]);
        assert_eq!(state.leader(), camel(1));
        assert_eq!(state.last_place(), camel(2));
    }

    #[test]
    fn test_pay_floors_at_zero() {
        let mut state = GameState::with_layout(
            &config(),
            1,
            &[(camel(0), 0), (camel(1), 0), (camel(2), 0)],
        );
        let p = PlayerId::new(0);

        state.pay(p, -5, false);
        assert_eq!(state.coins(p), 0);

        state.pay(p, -2, true);
        assert_eq!(state.coins(p), -2);
    }

    #[test]
    fn test_trap_lookup() {
        let mut state = GameState::with_layout(
            &config(),
            2,
            &[(camel(0), 0), (camel(1), 0), (camel(2), 0)],
        );
        let trap = Trap::new(PlayerId::new(1), TrapKind::Forward, 8);
        state.players[PlayerId::new(1)].trap = Some(trap);

        assert_eq!(state.trap_at(8), Some(trap));
        assert_eq!(state.trap_at(7), None);
        assert_eq!(state.traps().count(), 1);
    }
}
