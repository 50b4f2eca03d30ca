use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::{Action, GameState};
use crate::engine::TurnRecord;
use crate::error::Result;

use super::DELIMITER;

/// Column names for a game with the given table size.
#[must_use]
pub fn header(camel_count: usize, player_count: usize) -> Vec<String> {
    let mut columns: Vec<String> = [
        "action_index",
        "round",
        "player",
        "action",
        "bet_type",
        "camel",
        "distance",
        "trap_kind",
        "trap_position",
        "trap_triggered",
        "trap_owner",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for c in 0..camel_count {
        columns.push(format!("camel{}_position", c));
        columns.push(format!("camel{}_stack", c));
    }
    for p in 0..player_count {
        columns.push(format!("player{}_coins", p));
        columns.push(format!("player{}_trap_position", p));
        columns.push(format!("player{}_trap_kind", p));
    }
    columns
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes one game's rows.
pub struct GameLogWriter<W: Write> {
    out: W,
    rows: usize,
}

impl GameLogWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and write the header.
    pub fn create(path: impl AsRef<Path>, camel_count: usize, player_count: usize) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), camel_count, player_count)
    }
}

impl<W: Write> GameLogWriter<W> {
    /// Wrap `out` and write the header.
    pub fn new(mut out: W, camel_count: usize, player_count: usize) -> Result<Self> {
        writeln!(out, "{}", header(camel_count, player_count).join(&DELIMITER.to_string()))?;
        Ok(Self { out, rows: 0 })
    }

    /// Data rows written so far.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Append the row for `turn`, with `state` as it stood afterwards.
    pub fn write_turn(&mut self, turn: &TurnRecord, state: &GameState) -> Result<()> {
        let action = &turn.record.action;
        let bet_type = match action {
            Action::RoundBet { .. } => Some("round".to_string()),
            Action::GameBet { kind, .. } => Some(kind.to_string()),
            _ => None,
        };
        let fired = turn.camel_move.as_ref().and_then(|m| m.trap);
        let trap = turn.trap.or(fired);

        let mut row = vec![
            turn.record.index.to_string(),
            turn.record.round.to_string(),
            turn.record.player.index().to_string(),
            action.label().to_string(),
            opt(bet_type),
            opt(turn.camel().map(|c| c.index())),
            opt(turn.camel_move.as_ref().map(|m| m.distance())),
            opt(trap.map(|t| t.kind)),
            opt(trap.map(|t| t.position)),
            if fired.is_some() { "1" } else { "0" }.to_string(),
            opt(trap.map(|t| t.owner.index())),
        ];

        for camel in state.camels() {
            row.push(camel.position.to_string());
            row.push(camel.stack.to_string());
        }
        for (_, player) in state.players.iter() {
            row.push(player.coins.to_string());
            row.push(opt(player.trap.map(|t| t.position)));
            row.push(opt(player.trap.map(|t| t.kind)));
        }

        writeln!(self.out, "{}", row.join(&DELIMITER.to_string()))?;
        self.rows += 1;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionRecord, CamelId, GameConfig, PlayerId, Trap, TrapKind};

    #[test]
    fn test_header_width() {
        let columns = header(5, 4);
        assert_eq!(columns.len(), 11 + 5 * 2 + 4 * 3);
        assert_eq!(columns[11], "camel0_position");
        assert_eq!(columns.last().map(String::as_str), Some("player3_trap_kind"));
    }

    #[test]
    fn test_trap_row() {
        let config = GameConfig::new().with_camel_count(2);
        let mut state = GameState::with_layout(&config, 2, &[(CamelId::new(0), 0), (CamelId::new(1), 2)]);
        let trap = Trap::new(PlayerId::new(1), TrapKind::Backward, 6);
        state.players[PlayerId::new(1)].trap = Some(trap);

        let turn = TurnRecord {
            record: ActionRecord::new(
                4,
                2,
                PlayerId::new(1),
                Action::PlaceTrap {
                    kind: TrapKind::Backward,
                    position: 6,
                },
            ),
            camel_move: None,
            trap: Some(trap),
            trap_moved: true,
            round_tile: None,
            round_ended: false,
            game_ended: false,
            payouts: Vec::new(),
        };

        let mut writer = GameLogWriter::new(Vec::new(), 2, 2).unwrap();
        writer.write_turn(&turn, &state).unwrap();
        assert_eq!(writer.rows(), 1);

        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "4,2,1,trap,,,,-,6,0,1,0,0,2,0,3,,,3,6,-");
    }
}
