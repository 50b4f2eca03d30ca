//! Bet resolution at round end and game end.

use serde::{Deserialize, Serialize};

use crate::core::{BetKind, GameConfig, GameState, PlayerId};

/// Coins paid to (or taken from) one player for one bet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub player: PlayerId,
    pub amount: i64,
}

/// Pay out and clear the round bets, in placement order.
///
/// A bet on the leader pays its tile, a bet on the runner-up pays
/// `round_second_payout`, anything else pays `round_wrong_payout`.
pub fn settle_round(config: &GameConfig, state: &mut GameState) -> Vec<Payout> {
    let ranking = state.ranking();
    let first = ranking[0];
    let second = ranking.get(1).copied();

    let bets = std::mem::take(&mut state.round_bets);
    let mut payouts = Vec::with_capacity(bets.len());

    for bet in bets.iter() {
        let amount = if bet.camel == first {
            bet.tile
        } else if Some(bet.camel) == second {
            config.round_second_payout
        } else {
            config.round_wrong_payout
        };
        state.pay(bet.player, amount, config.allow_negative_coins);
        payouts.push(Payout {
            player: bet.player,
            amount,
        });
    }

    payouts
}

/// Pay out the game bets, in placement order.
///
/// Correct winner bets and correct loser bets each walk down
/// `game_bet_payouts` independently; wrong bets pay `game_wrong_payout`.
pub fn settle_game(config: &GameConfig, state: &mut GameState) -> Vec<Payout> {
    let winner = state.leader();
    let loser = state.last_place();

    let mut winner_rank = 0;
    let mut loser_rank = 0;
    let bets = state.game_bets.clone();
    let mut payouts = Vec::with_capacity(bets.len());

    for bet in bets.iter() {
        let amount = match bet.kind {
            BetKind::Winner if bet.camel == winner => {
                winner_rank += 1;
                config.game_bet_payout(winner_rank - 1)
            }
            BetKind::Loser if bet.camel == loser => {
                loser_rank += 1;
                config.game_bet_payout(loser_rank - 1)
            }
            _ => config.game_wrong_payout,
        };
        state.pay(bet.player, amount, config.allow_negative_coins);
        payouts.push(Payout {
            player: bet.player,
            amount,
        });
    }

    payouts
}
