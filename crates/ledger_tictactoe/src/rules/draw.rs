//! Tie detection logic for tic-tac-toe.

use super::win::check_winner;
use crate::types::Board;
use tracing::instrument;

/// Checks if every cell carries a sign.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.iter().all(|cell| !cell.is_empty())
}

/// A full board on which nobody owns a line.
#[instrument(skip(board))]
pub fn is_tie(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}
