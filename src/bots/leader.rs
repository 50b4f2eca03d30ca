use crate::core::{Action, BetKind, GameRng, PlayerId, PlayerView};

use super::Bot;

/// Smallest tile worth taking on the current leader.
const MIN_TILE: i64 = 3;

/// Backs the camel in front.
///
/// Takes the round-bet tile on the leader while it is worth at least
/// `MIN_TILE`. Late in the race (leader within one die throw of the end)
/// it places a winner bet on the leader if it still can. Otherwise it
/// moves a camel.
#[derive(Clone, Debug)]
pub struct LeaderBot {
    rng: GameRng,
}

impl LeaderBot {
    /// Create a leader bot drawing fallback choices from `rng`.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    fn preferred(view: &PlayerView) -> Vec<Action> {
        let ranking = view.ranking();
        let leader = ranking[0];
        let mut wanted = Vec::new();

        let lead_position = view.camels[leader.index()].position;
        let close_to_finish =
            lead_position + usize::from(view.config.die_max) >= view.config.board_size;
        if close_to_finish {
            wanted.push(Action::GameBet {
                kind: BetKind::Winner,
                camel: leader,
            });
            if let Some(&last) = ranking.last() {
                wanted.push(Action::GameBet {
                    kind: BetKind::Loser,
                    camel: last,
                });
            }
        }

        if view.next_round_tile(leader).is_some_and(|tile| tile >= MIN_TILE) {
            wanted.push(Action::RoundBet { camel: leader });
        }

        wanted.push(Action::MoveCamel);
        wanted
    }
}

impl Bot for LeaderBot {
    fn name(&self) -> &str {
        "leader"
    }

    fn decide(&mut self, _player: PlayerId, view: &PlayerView, legal: &[Action]) -> Action {
        Self::preferred(view)
            .into_iter()
            .find(|a| legal.contains(a))
            .or_else(|| self.rng.choose(legal).copied())
            .unwrap_or(Action::MoveCamel)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::{CamelId, GameConfig, GameState, RoundBet};
    use crate::rules::RulesEngine;

    fn view_of(state: &GameState, config: &Arc<GameConfig>) -> PlayerView {
        PlayerView::new(state, Arc::clone(config), PlayerId::new(0))
    }

    #[test]
    fn test_takes_high_tile_on_leader() {
        let config = Arc::new(GameConfig::new().with_camel_count(2));
        let state = GameState::with_layout(&config, 2, &[(CamelId::new(0), 1), (CamelId::new(1), 4)]);
        let legal = RulesEngine::new(Arc::clone(&config)).legal_actions(&state, PlayerId::new(0));

        let mut bot = LeaderBot::new(GameRng::new(0));
        let action = bot.decide(PlayerId::new(0), &view_of(&state, &config), &legal);
        assert_eq!(action, Action::RoundBet { camel: CamelId::new(1) });
    }

    #[test]
    fn test_moves_when_tiles_are_low() {
        let config = Arc::new(GameConfig::new().with_camel_count(2));
        let mut state = GameState::with_layout(&config, 2, &[(CamelId::new(0), 1), (CamelId::new(1), 4)]);
        for tile in [5, 3] {
            state.round_bets.push_back(RoundBet {
                player: PlayerId::new(1),
                camel: CamelId::new(1),
                tile,
            });
        }
        let legal = RulesEngine::new(Arc::clone(&config)).legal_actions(&state, PlayerId::new(0));

        let mut bot = LeaderBot::new(GameRng::new(0));
        let action = bot.decide(PlayerId::new(0), &view_of(&state, &config), &legal);
        assert_eq!(action, Action::MoveCamel);
    }

    #[test]
    fn test_backs_winner_near_finish() {
        let config = Arc::new(GameConfig::new().with_camel_count(2));
        let state = GameState::with_layout(&config, 2, &[(CamelId::new(0), 1), (CamelId::new(1), 14)]);
        let legal = RulesEngine::new(Arc::clone(&config)).legal_actions(&state, PlayerId::new(0));

        let mut bot = LeaderBot::new(GameRng::new(0));
        let action = bot.decide(PlayerId::new(0), &view_of(&state, &config), &legal);
        assert_eq!(
            action,
            Action::GameBet {
                kind: BetKind::Winner,
                camel: CamelId::new(1)
            }
        );
    }
}
