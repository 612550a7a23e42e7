//! The stored outcome agrees with the board.

use super::Invariant;
use crate::record::GameRecord;
use crate::rules::{check_winner, has_won, is_full, is_tie};
use crate::types::{GameState, Sign};

/// Invariant: `state` matches what the board shows.
///
/// - Active: no completed line and at least one empty cell.
/// - Won: the winner is a player, owns a completed line, and made the last
///   move.
/// - Tie: full board, no completed line.
pub struct TerminalConsistentInvariant;

impl Invariant<GameRecord> for TerminalConsistentInvariant {
    fn holds(record: &GameRecord) -> bool {
        let board = record.board();
        match record.state() {
            GameState::Active => check_winner(board).is_none() && !is_full(board),
            GameState::Tie => is_tie(board),
            GameState::Won { winner } => {
                let played = record.moves_played();
                if played == 0 {
                    return false;
                }
                let last_mover = Sign::for_player_index(played - 1);
                has_won(board, last_mover)
                    && !has_won(board, last_mover.opponent())
                    && record.player_with(last_mover) == *winner
            }
        }
    }

    fn description() -> &'static str {
        "Game state is consistent with the board"
    }
}
