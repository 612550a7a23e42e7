//! Filled cells match the turn counter.

use super::Invariant;
use crate::record::GameRecord;
use crate::types::Board;

/// Invariant: the board holds exactly `turn - 1` signs.
///
/// Also bounds the counter: `turn` is at least 1, at most 9 while the game
/// is active, and at most 10 once it has ended.
pub struct FilledMatchesTurnInvariant;

impl Invariant<GameRecord> for FilledMatchesTurnInvariant {
    fn holds(record: &GameRecord) -> bool {
        let turn = usize::from(*record.turn());
        if turn < 1 || turn > Board::CELLS + 1 {
            return false;
        }
        if record.is_active() && turn > Board::CELLS {
            return false;
        }

        record.board().filled() == turn - 1
    }

    fn description() -> &'static str {
        "Number of filled cells equals turn - 1"
    }
}
