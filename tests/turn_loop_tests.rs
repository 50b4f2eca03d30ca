//! Turn loop behaviour: round end, game end, trap landings, validation.

use std::collections::VecDeque;

use camel_sim::core::{Action, CamelId, GameConfig, GameRng, GameState, PlayerId, Trap, TrapKind};
use camel_sim::{Bot, Error, GameEngine, MoverBot, Phase, PlayerView};

/// Plays a fixed script, then moves camels.
struct ScriptedBot {
    script: VecDeque<Action>,
}

impl ScriptedBot {
    fn boxed(script: &[Action]) -> Box<dyn Bot> {
        Box::new(Self {
            script: script.iter().copied().collect(),
        })
    }
}

impl Bot for ScriptedBot {
    fn name(&self) -> &str {
        "scripted"
    }

    fn decide(&mut self, _player: PlayerId, _view: &PlayerView, _legal: &[Action]) -> Action {
        self.script.pop_front().unwrap_or(Action::MoveCamel)
    }
}

fn movers(n: usize) -> Vec<Box<dyn Bot>> {
    (0..n)
        .map(|i| Box::new(MoverBot::new(GameRng::new(i as u64))) as Box<dyn Bot>)
        .collect()
}

fn camel(i: u8) -> CamelId {
    CamelId::new(i)
}

/// Round end triggers after exactly as many camel moves as there are camels.
#[test]
fn test_round_ends_after_every_camel_moved() {
    for seed in 0..10 {
        let config = GameConfig::new().with_camel_count(3).with_die(1, 1);
        let mut engine = GameEngine::new(config, movers(2), seed).unwrap();

        let first = engine.play_turn().unwrap();
        let second = engine.play_turn().unwrap();
        assert!(!first.round_ended);
        assert!(!second.round_ended);
        assert_eq!(engine.state().moved.len(), 2);

        let third = engine.play_turn().unwrap();
        assert!(third.round_ended);
        assert!(engine.state().moved.is_empty());
        assert_eq!(engine.state().round, 2);
    }
}

/// Every camel moves exactly once per round, whatever the order.
#[test]
fn test_each_camel_moves_once_per_round() {
    let config = GameConfig::new().with_camel_count(5).with_die(1, 1);
    let mut engine = GameEngine::new(config, movers(3), 77).unwrap();

    let mut moved = Vec::new();
    for _ in 0..5 {
        let turn = engine.play_turn().unwrap();
        moved.push(turn.camel_move.unwrap().camel);
    }
    moved.sort();
    assert_eq!(moved, CamelId::all(5).collect::<Vec<_>>());
}

fn single_camel_engine(board_size: usize, start: usize, roll: u8) -> GameEngine {
    let config = GameConfig::new()
        .with_camel_count(1)
        .with_board_size(board_size)
        .with_die(roll, roll);
    let state = GameState::with_layout(&config, 1, &[(camel(0), start)]);
    GameEngine::with_state(config, state, movers(1), 0).unwrap()
}

/// Game end is exactly "position past the final cell", for several sizes.
#[test]
fn test_game_end_boundary() {
    for board_size in [4, 10, 16, 24] {
        let last = board_size - 1;

        let mut past = single_camel_engine(board_size, last, 2);
        let turn = past.play_turn().unwrap();
        assert!(turn.game_ended, "size {}: {} + 2 should finish", board_size, last);
        assert_eq!(past.phase(), Phase::Terminal);

        let mut onto_last = single_camel_engine(board_size, last - 1, 1);
        let turn = onto_last.play_turn().unwrap();
        assert!(!turn.game_ended, "size {}: landing on the final cell is not a finish", board_size);
        assert!(!onto_last.is_terminal());
    }
}

#[test]
fn test_backward_trap_puts_camel_at_bottom() {
    let config = GameConfig::new().with_camel_count(2);
    let mut state = GameState::with_layout(&config, 2, &[(camel(0), 0), (camel(1), 2)]);
    state.players[PlayerId::new(1)].trap = Some(Trap::new(PlayerId::new(1), TrapKind::Backward, 3));
    let mut engine = GameEngine::with_state(config, state, movers(2), 0).unwrap();

    let mv = engine.move_camel(camel(0), 3);

    assert_eq!(mv.to, 2);
    assert_eq!(engine.state().camel(camel(0)).stack, 0);
    assert_eq!(engine.state().camel(camel(1)).stack, 1);
    assert_eq!(engine.state().coins(PlayerId::new(1)), 4);
}

#[test]
fn test_plain_and_forward_landings_go_on_top() {
    let config = GameConfig::new().with_camel_count(3);
    let mut state = GameState::with_layout(&config, 2, &[(camel(0), 0), (camel(1), 2), (camel(2), 4)]);
    state.players[PlayerId::new(0)].trap = Some(Trap::new(PlayerId::new(0), TrapKind::Forward, 3));
    let mut engine = GameEngine::with_state(config, state, movers(2), 0).unwrap();

    engine.move_camel(camel(0), 2);
    assert_eq!(engine.state().stack_at(2).as_slice(), &[camel(1), camel(0)]);

    // Camel 1 carries camel 0 onto the forward trap and on to cell 4.
    let mv = engine.move_camel(camel(1), 1);
    assert_eq!(mv.to, 4);
    assert_eq!(engine.state().stack_at(4).as_slice(), &[camel(2), camel(1), camel(0)]);
}

#[test]
fn test_trap_is_placed_then_moved() {
    let first = Action::PlaceTrap {
        kind: TrapKind::Forward,
        position: 6,
    };
    let second = Action::PlaceTrap {
        kind: TrapKind::Backward,
        position: 9,
    };
    let bots = vec![ScriptedBot::boxed(&[first, second])];
    let mut engine = GameEngine::new(GameConfig::default(), bots, 3).unwrap();

    let placed = engine.play_turn().unwrap();
    assert!(!placed.trap_moved);

    let moved = engine.play_turn().unwrap();
    assert!(moved.trap_moved);
    assert_eq!(engine.state().trap_at(6), None);
    assert_eq!(
        engine.state().trap_at(9),
        Some(Trap::new(PlayerId::new(0), TrapKind::Backward, 9))
    );
}

#[test]
fn test_illegal_move_is_fatal() {
    let trap = Action::PlaceTrap {
        kind: TrapKind::Forward,
        position: 5,
    };
    let bots = vec![ScriptedBot::boxed(&[trap]), ScriptedBot::boxed(&[trap])];
    let mut engine = GameEngine::new(GameConfig::default(), bots, 3).unwrap();

    engine.play_turn().unwrap();
    let err = engine.play_turn().unwrap_err();

    assert!(matches!(err, Error::IllegalMove { player, .. } if player == PlayerId::new(1)));
    assert!(engine.is_terminal());
    assert!(matches!(engine.play_turn(), Err(Error::GameOver)));
}

#[test]
fn test_malformed_action_is_fatal() {
    let ghost = Action::GameBet {
        kind: camel_sim::BetKind::Winner,
        camel: camel(42),
    };
    let mut engine = GameEngine::new(GameConfig::default(), vec![ScriptedBot::boxed(&[ghost])], 3).unwrap();

    let err = engine.play_turn().unwrap_err();
    assert!(matches!(err, Error::MalformedAction { .. }));
    assert_eq!(engine.state().turn, 0);
}

/// Earlier round bets on the leader pay strictly more.
#[test]
fn test_round_bet_payouts_decrease_with_order() {
    let config = GameConfig::new().with_camel_count(1).with_die(1, 1);
    let state = GameState::with_layout(&config, 4, &[(camel(0), 0)]);
    let bet = Action::RoundBet { camel: camel(0) };
    let bots = vec![
        ScriptedBot::boxed(&[bet]),
        ScriptedBot::boxed(&[bet]),
        ScriptedBot::boxed(&[bet]),
        ScriptedBot::boxed(&[]),
    ];
    let mut engine = GameEngine::with_state(config, state, bots, 0).unwrap();

    for _ in 0..3 {
        engine.play_turn().unwrap();
    }
    let turn = engine.play_turn().unwrap();

    assert!(turn.round_ended);
    let amounts: Vec<i64> = turn.payouts.iter().map(|p| p.amount).collect();
    assert_eq!(amounts.len(), 3);
    assert!(amounts[0] > amounts[1]);
    assert!(amounts[1] > amounts[2]);
    assert_eq!(turn.payouts[0].player, PlayerId::new(0));
}

#[test]
fn test_traps_clear_at_round_end() {
    let trap = Action::PlaceTrap {
        kind: TrapKind::Backward,
        position: 12,
    };
    let config = GameConfig::new().with_camel_count(1).with_die(1, 1);
    let state = GameState::with_layout(&config, 2, &[(camel(0), 0)]);
    let bots = vec![ScriptedBot::boxed(&[trap]), ScriptedBot::boxed(&[])];
    let mut engine = GameEngine::with_state(config, state, bots, 0).unwrap();

    engine.play_turn().unwrap();
    assert!(engine.state().trap_at(12).is_some());

    let turn = engine.play_turn().unwrap();
    assert!(turn.round_ended);
    assert!(engine.state().trap_at(12).is_none());
}

#[test]
fn test_same_seed_same_game() {
    let play = || {
        let mut engine = GameEngine::new(GameConfig::default(), movers(3), 2024).unwrap();
        let outcome = engine.run().unwrap();
        (outcome, engine.state().history.clone())
    };

    let (a, history_a) = play();
    let (b, history_b) = play();
    assert_eq!(a, b);
    assert_eq!(history_a, history_b);
}

/// A race decided mid-round pays the open round bets, then the game bets
/// in placement order.
#[test]
fn test_game_end_settles_round_then_game_bets() {
    let config = GameConfig::new().with_camel_count(2).with_die(1, 1);
    // Camel 1 rides on camel 0 at the final cell: whichever moves, camel 1
    // leads and camel 0 trails.
    let state = GameState::with_layout(&config, 4, &[(camel(0), 15), (camel(1), 15)]);
    let winner = |c| Action::GameBet {
        kind: camel_sim::BetKind::Winner,
        camel: camel(c),
    };
    let loser = Action::GameBet {
        kind: camel_sim::BetKind::Loser,
        camel: camel(0),
    };
    let bots = vec![
        ScriptedBot::boxed(&[Action::RoundBet { camel: camel(1) }]),
        ScriptedBot::boxed(&[winner(1)]),
        ScriptedBot::boxed(&[winner(1)]),
        ScriptedBot::boxed(&[loser]),
    ];
    let mut engine = GameEngine::with_state(config, state, bots, 8).unwrap();

    for _ in 0..4 {
        let turn = engine.play_turn().unwrap();
        assert!(turn.payouts.is_empty());
    }
    let turn = engine.play_turn().unwrap();

    assert!(turn.game_ended);
    assert!(!turn.round_ended);
    let payouts: Vec<(u8, i64)> = turn.payouts.iter().map(|p| (p.player.0, p.amount)).collect();
    assert_eq!(payouts, vec![(0, 5), (1, 8), (2, 5), (3, 8)]);

    let outcome = engine.outcome().unwrap();
    assert_eq!(outcome.winner, camel(1));
    assert_eq!(outcome.loser, camel(0));
    let coins: Vec<i64> = outcome.coins.iter().map(|(_, &c)| c).collect();
    // Player 0 also earned the move fee.
    assert_eq!(coins, vec![9, 11, 8, 11]);
}

#[test]
fn test_camels_never_start_past_the_final_cell() {
    let config = GameConfig::new().with_board_size(4).with_die(1, 6);
    let err = GameEngine::new(config, movers(2), 0).err().unwrap();
    assert!(matches!(err, Error::InvalidConfig(_)));

    for seed in 0..20 {
        let config = GameConfig::new().with_board_size(4).with_die(1, 3);
        let engine = GameEngine::new(config, movers(2), seed).unwrap();
        assert!(!engine.state().has_finisher());
        assert!(!engine.is_terminal());
    }
}
