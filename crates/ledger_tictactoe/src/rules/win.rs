//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Sign, Tile};
use strum::IntoEnumIterator;
use tracing::instrument;

/// The eight winning lines: rows, columns, then diagonals.
pub const LINES: [[Tile; 3]; 8] = [
    // Rows
    [Tile::new(0, 0), Tile::new(0, 1), Tile::new(0, 2)],
    [Tile::new(1, 0), Tile::new(1, 1), Tile::new(1, 2)],
    [Tile::new(2, 0), Tile::new(2, 1), Tile::new(2, 2)],
    // Columns
    [Tile::new(0, 0), Tile::new(1, 0), Tile::new(2, 0)],
    [Tile::new(0, 1), Tile::new(1, 1), Tile::new(2, 1)],
    [Tile::new(0, 2), Tile::new(1, 2), Tile::new(2, 2)],
    // Diagonals
    [Tile::new(0, 0), Tile::new(1, 1), Tile::new(2, 2)],
    [Tile::new(0, 2), Tile::new(1, 1), Tile::new(2, 0)],
];

/// Returns true if `sign` owns every cell of at least one line.
#[instrument(skip(board))]
pub fn has_won(board: &Board, sign: Sign) -> bool {
    LINES.iter().any(|line| {
        line.iter()
            .all(|tile| board.get(*tile) == Some(Cell::Marked(sign)))
    })
}

/// Returns the sign owning a complete line, if any.
///
/// X is checked first; a board where both signs own a line is unreachable
/// through play.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Sign> {
    Sign::iter().find(|sign| has_won(board, *sign))
}
