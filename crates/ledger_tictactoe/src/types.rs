//! Core domain types for account-backed tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::instrument;

/// Identity handle of a player or account (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Pubkey([u8; 32]);

impl Pubkey {
    /// Size of an encoded identity handle in bytes.
    pub const LEN: usize = 32;

    /// Wraps raw key bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns a key that no other call in this process has returned.
    ///
    /// Keys are derived from a process-wide counter, so they are only
    /// suitable for tests and local scripts.
    pub fn new_unique() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    /// Returns the raw key bytes.
    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Borrows the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for Pubkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pubkey({})", self)
    }
}

/// Error parsing a [`Pubkey`] from its hex form.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PubkeyParseError {
    /// Input was not 64 hex characters long.
    #[display("Expected 64 hex characters, got {}", _0)]
    WrongLength(#[error(not(source))] usize),
    /// Input contained a non-hex character.
    #[display("Invalid hex character {:?}", _0)]
    InvalidCharacter(#[error(not(source))] char),
}

impl std::str::FromStr for Pubkey {
    type Err = PubkeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 64 {
            return Err(PubkeyParseError::WrongLength(chars.len()));
        }

        let mut bytes = [0u8; 32];
        for (i, pair) in chars.chunks(2).enumerate() {
            let hi = pair[0]
                .to_digit(16)
                .ok_or(PubkeyParseError::InvalidCharacter(pair[0]))?;
            let lo = pair[1]
                .to_digit(16)
                .ok_or(PubkeyParseError::InvalidCharacter(pair[1]))?;
            bytes[i] = ((hi << 4) | lo) as u8;
        }
        Ok(Self(bytes))
    }
}

impl From<Pubkey> for String {
    fn from(key: Pubkey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for Pubkey {
    type Error = PubkeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Mark placed on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Owned by the first player.
    X,
    /// Owned by the second player.
    O,
}

impl Sign {
    /// Returns the other sign.
    pub fn opponent(self) -> Self {
        match self {
            Sign::X => Sign::O,
            Sign::O => Sign::X,
        }
    }

    /// Sign owned by the player at `index` in the players pair.
    pub fn for_player_index(index: usize) -> Self {
        if index % 2 == 0 { Sign::X } else { Sign::O }
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell carries a sign.
    Marked(Sign),
}

impl Cell {
    /// Returns true if no sign has been placed.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the sign in this cell, if any.
    pub fn sign(self) -> Option<Sign> {
        match self {
            Cell::Empty => None,
            Cell::Marked(sign) => Some(sign),
        }
    }
}

/// Coordinates of a cell as submitted by a caller.
///
/// Coordinates are not range-checked on construction; the engine reports
/// out-of-range tiles as a typed rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Row index (0-2).
    pub row: u8,
    /// Column index (0-2).
    pub column: u8,
}

impl Tile {
    /// Creates a tile.
    pub const fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// Returns true if both coordinates lie on the board.
    pub fn is_in_bounds(self) -> bool {
        usize::from(self.row) < Board::SIZE && usize::from(self.column) < Board::SIZE
    }

    /// All nine tiles in row-major order.
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..Board::SIZE as u8).flat_map(|row| (0..Board::SIZE as u8).map(move |column| Tile { row, column }))
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// 3x3 tic-tac-toe board, indexed `[row][column]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; 3]; 3],
}

impl Board {
    /// Side length of the board.
    pub const SIZE: usize = 3;

    /// Total number of cells.
    pub const CELLS: usize = Self::SIZE * Self::SIZE;

    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from rows of cells.
    pub fn from_rows(cells: [[Cell; 3]; 3]) -> Self {
        Self { cells }
    }

    /// Gets the cell at `tile`, or `None` if the tile is off the board.
    pub fn get(&self, tile: Tile) -> Option<Cell> {
        self.cells
            .get(usize::from(tile.row))
            .and_then(|row| row.get(usize::from(tile.column)))
            .copied()
    }

    /// Sets a cell. Callers must have bounds-checked the tile.
    pub(crate) fn set(&mut self, tile: Tile, cell: Cell) {
        self.cells[usize::from(tile.row)][usize::from(tile.column)] = cell;
    }

    /// Returns the rows of the board.
    pub fn rows(&self) -> &[[Cell; 3]; 3] {
        &self.cells
    }

    /// Iterates all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// Number of cells carrying a sign.
    pub fn filled(&self) -> usize {
        self.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Number of cells carrying `sign`.
    pub fn count(&self, sign: Sign) -> usize {
        self.iter().filter(|cell| *cell == Cell::Marked(sign)).count()
    }

    /// Tiles that are still empty, in row-major order.
    #[instrument(skip(self))]
    pub fn empty_tiles(&self) -> Vec<Tile> {
        Tile::all()
            .filter(|tile| self.get(*tile) == Some(Cell::Empty))
            .collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let symbol = match cell {
                    Cell::Empty => ".".to_string(),
                    Cell::Marked(sign) => sign.to_string(),
                };
                f.write_str(&symbol)?;
                if c < Self::SIZE - 1 {
                    f.write_str("|")?;
                }
            }
            if r < Self::SIZE - 1 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    /// Moves are accepted.
    #[default]
    Active,
    /// A player completed a line.
    Won {
        /// Identity of the winning player.
        winner: Pubkey,
    },
    /// The board filled up without a completed line.
    Tie,
}

impl GameState {
    /// Returns true for `Won` and `Tie`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameState::Active)
    }
}
