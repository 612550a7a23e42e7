//! Fixed binary layout of a [`GameRecord`] account.
//!
//! | Offset | Size | Field                                         |
//! |--------|------|-----------------------------------------------|
//! | 0      | 8    | discriminator `b"TTTGAME1"`                   |
//! | 8      | 32   | players\[0\]                                  |
//! | 40     | 32   | players\[1\]                                  |
//! | 72     | 1    | turn                                          |
//! | 73     | 9    | board, row-major, Empty=0 X=1 O=2             |
//! | 82     | 1    | state, Active=0 Won=1 Tie=2                   |
//! | 83     | 32   | winner when Won, zero otherwise               |
//!
//! Bytes past [`GameRecord::LEN`] are ignored so hosts may over-allocate.

use crate::invariants::{InvariantSet, RecordInvariants};
use crate::record::GameRecord;
use crate::types::{Board, Cell, GameState, Pubkey, Sign, Tile};
use derive_more::{Display, Error};
use tracing::{instrument, warn};

/// Leading bytes identifying a game account.
pub const DISCRIMINATOR: [u8; 8] = *b"TTTGAME1";

const PLAYERS_OFFSET: usize = DISCRIMINATOR.len();
const TURN_OFFSET: usize = PLAYERS_OFFSET + 2 * Pubkey::LEN;
const BOARD_OFFSET: usize = TURN_OFFSET + 1;
const STATE_OFFSET: usize = BOARD_OFFSET + Board::CELLS;
const WINNER_OFFSET: usize = STATE_OFFSET + 1;

const CELL_EMPTY: u8 = 0;
const CELL_X: u8 = 1;
const CELL_O: u8 = 2;

const STATE_ACTIVE: u8 = 0;
const STATE_WON: u8 = 1;
const STATE_TIE: u8 = 2;

/// Failure decoding or encoding an account buffer.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum LayoutError {
    /// Buffer cannot hold a record.
    #[display("Buffer too short: expected {expected} bytes, got {actual}")]
    TooShort {
        /// Required size.
        expected: usize,
        /// Size provided.
        actual: usize,
    },
    /// Leading bytes are not a game account discriminator.
    #[display("Account discriminator mismatch")]
    BadDiscriminator,
    /// A board byte is not a known cell tag.
    #[display("Unknown cell tag {tag} at {tile}")]
    UnknownCell {
        /// Cell position.
        tile: Tile,
        /// Offending byte.
        tag: u8,
    },
    /// The state byte is not a known tag.
    #[display("Unknown game state tag {tag}")]
    UnknownState {
        /// Offending byte.
        tag: u8,
    },
    /// Winner bytes are set although the game has not been won.
    #[display("Winner field must be zero unless the game is won")]
    WinnerPadding,
    /// The decoded record breaks a record invariant.
    #[display("Record violates invariants: {violations}")]
    InvariantViolation {
        /// Descriptions of the violated invariants.
        violations: String,
    },
}

fn cell_tag(cell: Cell) -> u8 {
    match cell {
        Cell::Empty => CELL_EMPTY,
        Cell::Marked(Sign::X) => CELL_X,
        Cell::Marked(Sign::O) => CELL_O,
    }
}

fn read_pubkey(buf: &[u8], offset: usize) -> Pubkey {
    let mut bytes = [0u8; Pubkey::LEN];
    bytes.copy_from_slice(&buf[offset..offset + Pubkey::LEN]);
    Pubkey::new(bytes)
}

impl GameRecord {
    /// Encoded size in bytes.
    pub const LEN: usize = WINNER_OFFSET + Pubkey::LEN;

    /// Encodes the record into its fixed layout.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut buf = [0u8; Self::LEN];
        self.encode_into(&mut buf);
        buf
    }

    /// Writes the record at the start of `buf`, leaving trailing bytes alone.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::TooShort`] if `buf` is smaller than [`Self::LEN`].
    #[instrument(skip_all, fields(len = buf.len()))]
    pub fn write_to(&self, buf: &mut [u8]) -> Result<(), LayoutError> {
        if buf.len() < Self::LEN {
            return Err(LayoutError::TooShort {
                expected: Self::LEN,
                actual: buf.len(),
            });
        }
        self.encode_into(&mut buf[..Self::LEN]);
        Ok(())
    }

    fn encode_into(&self, buf: &mut [u8]) {
        buf[..PLAYERS_OFFSET].copy_from_slice(&DISCRIMINATOR);
        for (i, player) in self.players.iter().enumerate() {
            let start = PLAYERS_OFFSET + i * Pubkey::LEN;
            buf[start..start + Pubkey::LEN].copy_from_slice(player.as_bytes());
        }
        buf[TURN_OFFSET] = self.turn;
        for (i, cell) in self.board.iter().enumerate() {
            buf[BOARD_OFFSET + i] = cell_tag(cell);
        }
        let (tag, winner) = match self.state {
            GameState::Active => (STATE_ACTIVE, [0u8; Pubkey::LEN]),
            GameState::Won { winner } => (STATE_WON, winner.to_bytes()),
            GameState::Tie => (STATE_TIE, [0u8; Pubkey::LEN]),
        };
        buf[STATE_OFFSET] = tag;
        buf[WINNER_OFFSET..WINNER_OFFSET + Pubkey::LEN].copy_from_slice(&winner);
    }

    /// Decodes and validates a record.
    ///
    /// # Errors
    ///
    /// Rejects short buffers, foreign discriminators, unknown tags, stray
    /// winner bytes, and records that break any invariant.
    #[instrument(skip_all, fields(len = buf.len()))]
    pub fn from_bytes(buf: &[u8]) -> Result<Self, LayoutError> {
        if buf.len() < Self::LEN {
            return Err(LayoutError::TooShort {
                expected: Self::LEN,
                actual: buf.len(),
            });
        }
        if buf[..PLAYERS_OFFSET] != DISCRIMINATOR {
            return Err(LayoutError::BadDiscriminator);
        }

        let players = [
            read_pubkey(buf, PLAYERS_OFFSET),
            read_pubkey(buf, PLAYERS_OFFSET + Pubkey::LEN),
        ];
        let turn = buf[TURN_OFFSET];

        let mut cells = [[Cell::Empty; 3]; 3];
        for tile in Tile::all() {
            let index = usize::from(tile.row) * Board::SIZE + usize::from(tile.column);
            let tag = buf[BOARD_OFFSET + index];
            cells[usize::from(tile.row)][usize::from(tile.column)] = match tag {
                CELL_EMPTY => Cell::Empty,
                CELL_X => Cell::Marked(Sign::X),
                CELL_O => Cell::Marked(Sign::O),
                _ => return Err(LayoutError::UnknownCell { tile, tag }),
            };
        }

        let winner_bytes = &buf[WINNER_OFFSET..WINNER_OFFSET + Pubkey::LEN];
        let state = match buf[STATE_OFFSET] {
            STATE_WON => GameState::Won {
                winner: read_pubkey(buf, WINNER_OFFSET),
            },
            tag @ (STATE_ACTIVE | STATE_TIE) => {
                if winner_bytes.iter().any(|b| *b != 0) {
                    return Err(LayoutError::WinnerPadding);
                }
                if tag == STATE_ACTIVE {
                    GameState::Active
                } else {
                    GameState::Tie
                }
            }
            tag => return Err(LayoutError::UnknownState { tag }),
        };

        let record = Self {
            players,
            turn,
            board: Board::from_rows(cells),
            state,
        };

        check_record(&record)?;
        Ok(record)
    }
}

/// Runs the record invariants over a record built outside the engine.
pub(crate) fn check_record(record: &GameRecord) -> Result<(), LayoutError> {
    RecordInvariants::check_all(record).map_err(|violations| {
        let violations = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%violations, "Rejecting corrupt game record");
        LayoutError::InvariantViolation { violations }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameEngine;

    fn won_record() -> GameRecord {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let mut record = GameEngine::setup_game(a, b);
        for (player, tile) in [
            (a, Tile::new(0, 0)),
            (b, Tile::new(1, 1)),
            (a, Tile::new(0, 1)),
            (b, Tile::new(2, 2)),
            (a, Tile::new(0, 2)),
        ] {
            record = GameEngine::play(&record, player, tile).unwrap();
        }
        record
    }

    #[test]
    fn test_layout_size() {
        assert_eq!(GameRecord::LEN, 115);
    }

    #[test]
    fn test_new_record_bytes() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let bytes = GameEngine::setup_game(a, b).to_bytes();

        assert_eq!(&bytes[..8], b"TTTGAME1");
        assert_eq!(&bytes[8..40], a.as_bytes());
        assert_eq!(&bytes[40..72], b.as_bytes());
        assert_eq!(bytes[72], 1);
        assert!(bytes[73..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_won_record_bytes() {
        let record = won_record();
        let bytes = record.to_bytes();

        assert_eq!(bytes[72], 6);
        // Row-major: X X X / . O . / . . O
        assert_eq!(&bytes[73..82], &[1, 1, 1, 0, 2, 0, 0, 0, 2]);
        assert_eq!(bytes[82], 1);
        assert_eq!(&bytes[83..115], record.players()[0].as_bytes());
        assert_eq!(GameRecord::from_bytes(&bytes), Ok(record));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let record = won_record();
        let mut buf = vec![0xAA; GameRecord::LEN + 16];
        record.write_to(&mut buf).unwrap();

        assert!(buf[GameRecord::LEN..].iter().all(|b| *b == 0xAA));
        assert_eq!(GameRecord::from_bytes(&buf), Ok(record));
    }

    #[test]
    fn test_short_buffer_rejected() {
        let record = won_record();
        let mut small = [0u8; 10];
        assert_eq!(
            record.write_to(&mut small),
            Err(LayoutError::TooShort {
                expected: GameRecord::LEN,
                actual: 10
            })
        );
        assert!(matches!(
            GameRecord::from_bytes(&record.to_bytes()[..100]),
            Err(LayoutError::TooShort { .. })
        ));
    }

    #[test]
    fn test_bad_tags_rejected() {
        let bytes = GameEngine::setup_game(Pubkey::new_unique(), Pubkey::new_unique()).to_bytes();

        let mut bad = bytes;
        bad[0] = b'X';
        assert_eq!(GameRecord::from_bytes(&bad), Err(LayoutError::BadDiscriminator));

        let mut bad = bytes;
        bad[BOARD_OFFSET + 4] = 7;
        assert_eq!(
            GameRecord::from_bytes(&bad),
            Err(LayoutError::UnknownCell {
                tile: Tile::new(1, 1),
                tag: 7
            })
        );

        let mut bad = bytes;
        bad[STATE_OFFSET] = 3;
        assert_eq!(
            GameRecord::from_bytes(&bad),
            Err(LayoutError::UnknownState { tag: 3 })
        );

        let mut bad = bytes;
        bad[WINNER_OFFSET + 5] = 1;
        assert_eq!(GameRecord::from_bytes(&bad), Err(LayoutError::WinnerPadding));
    }

    #[test]
    fn test_invariant_breaking_bytes_rejected() {
        let mut bytes =
            GameEngine::setup_game(Pubkey::new_unique(), Pubkey::new_unique()).to_bytes();
        // An X on the board while the turn counter still says nobody moved.
        bytes[BOARD_OFFSET] = CELL_X;

        assert!(matches!(
            GameRecord::from_bytes(&bytes),
            Err(LayoutError::InvariantViolation { .. })
        ));
    }
}
