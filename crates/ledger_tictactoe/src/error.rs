//! Rejections raised by the game engine.

use derive_more::{Display, Error};
use strum::IntoEnumIterator;

/// Offset added to every engine error code when surfaced by a host.
pub const ERROR_CODE_OFFSET: u32 = 6000;

/// Why a move was rejected.
///
/// Every variant is a validation failure against the pre-move record; the
/// record is never modified when one is returned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Error, strum::EnumIter, strum::IntoStaticStr,
)]
pub enum GameError {
    /// The game has already been won or tied.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// The submitting identity is not the player to move.
    #[display("It is not this player's turn")]
    NotPlayersTurn,

    /// The target cell already carries a sign.
    #[display("Tile is already set")]
    TileAlreadySet,

    /// Row or column lies outside 0-2.
    #[display("Tile is out of bounds")]
    TileOutOfBounds,
}

impl GameError {
    /// Numeric code surfaced to end callers.
    ///
    /// Codes follow declaration order.
    pub fn code(self) -> u32 {
        ERROR_CODE_OFFSET
            + match self {
                GameError::GameAlreadyOver => 0,
                GameError::NotPlayersTurn => 1,
                GameError::TileAlreadySet => 2,
                GameError::TileOutOfBounds => 3,
            }
    }

    /// Looks up an error kind by its numeric code.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::iter().find(|e| e.code() == code)
    }

    /// Stable identifier for logs and client mapping.
    pub fn name(self) -> &'static str {
        self.into()
    }
}
