//! Camel movement and trap resolution.
//!
//! A moving camel carries everything stacked on it. Without a trap the
//! unit lands on top of the destination stack. A forward trap pushes the
//! unit further and it lands on top; a backward trap pulls it back and it
//! lands underneath. `TrapStackPolicy` decides whether riders share the
//! trap's effect or stop on the trap cell.

use serde::{Deserialize, Serialize};

use crate::core::{CamelId, GameConfig, GameState, Stack, Trap, TrapKind, TrapStackPolicy};

/// Everything that happened during one camel move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CamelMove {
    pub camel: CamelId,
    pub roll: u8,
    pub from: usize,
    pub to: usize,
    /// The trap the camel landed on, if any.
    pub trap: Option<Trap>,
    /// Camels that ended the move on `to` together with `camel`, bottom
    /// first, `camel` included.
    pub unit: Stack,
}

impl CamelMove {
    /// Net distance after trap effects. Negative never happens with the
    /// default die, but can with `trap_offset` above the lowest face.
    #[must_use]
    pub fn distance(&self) -> i64 {
        self.to as i64 - self.from as i64
    }
}

/// Move `camel` by `roll` cells and resolve any trap it lands on.
///
/// Pays the trap fee to the trap's owner. Does not mark the camel as
/// moved and does not pay the acting player.
pub fn advance(config: &GameConfig, state: &mut GameState, camel: CamelId, roll: u8) -> CamelMove {
    let from = state.camel(camel).position;
    let mut unit = state.lift_unit(camel);
    let landing = from + usize::from(roll);

    let Some(trap) = state.trap_at(landing) else {
        state.drop_on_top(&unit, landing);
        return CamelMove {
            camel,
            roll,
            from,
            to: landing,
            trap: None,
            unit,
        };
    };

    state.pay(trap.owner, config.trap_fee, config.allow_negative_coins);

    if config.trap_stack_policy == TrapStackPolicy::LandingCamelOnly && unit.len() > 1 {
        state.drop_on_top(&unit[1..], landing);
        unit.truncate(1);
    }

    let to = match trap.kind {
        TrapKind::Forward => {
            let to = landing + config.trap_offset;
            state.drop_on_top(&unit, to);
            to
        }
        TrapKind::Backward => {
            let to = landing.saturating_sub(config.trap_offset);
            state.drop_underneath(&unit, to);
            to
        }
    };

    log::trace!("{} hit trap {} at {}, now at {}", camel, trap.kind, landing, to);

    CamelMove {
        camel,
        roll,
        from,
        to,
        trap: Some(trap),
        unit,
    }
}
