//! The persisted state of one game.

use super::types::{Board, GameState, Pubkey, Sign};
use crate::layout::{LayoutError, check_record};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Persisted state of one game instance.
///
/// Records are only produced by [`GameEngine`](crate::GameEngine) or by
/// decoding a validated account buffer or JSON view, so every value observed
/// through the public API satisfies the
/// [`RecordInvariants`](crate::RecordInvariants).
///
/// The player to move is never stored; it is derived from `turn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
#[serde(try_from = "UncheckedRecord")]
pub struct GameRecord {
    /// `[first mover (X), second mover (O)]`.
    pub(crate) players: [Pubkey; 2],
    /// Starts at 1, incremented once per accepted move.
    pub(crate) turn: u8,
    /// Current board.
    pub(crate) board: Board,
    /// Active, won or tied.
    pub(crate) state: GameState,
}

/// Deserialized fields before the invariant check.
#[derive(Deserialize)]
struct UncheckedRecord {
    players: [Pubkey; 2],
    turn: u8,
    board: Board,
    state: GameState,
}

impl TryFrom<UncheckedRecord> for GameRecord {
    type Error = LayoutError;

    fn try_from(raw: UncheckedRecord) -> Result<Self, Self::Error> {
        let record = Self {
            players: raw.players,
            turn: raw.turn,
            board: raw.board,
            state: raw.state,
        };
        check_record(&record)?;
        Ok(record)
    }
}

impl GameRecord {
    /// Turn number of a freshly created game.
    pub const FIRST_TURN: u8 = 1;

    /// Creates an active game with an empty board.
    pub(crate) fn new(player_one: Pubkey, player_two: Pubkey) -> Self {
        Self {
            players: [player_one, player_two],
            turn: Self::FIRST_TURN,
            board: Board::new(),
            state: GameState::Active,
        }
    }

    /// Index into `players` of the player whose turn it is.
    pub fn current_player_index(&self) -> usize {
        usize::from(self.turn.saturating_sub(1)) % 2
    }

    /// Identity of the player whose turn it is.
    pub fn current_player(&self) -> Pubkey {
        self.players[self.current_player_index()]
    }

    /// Sign placed by the player whose turn it is.
    pub fn current_sign(&self) -> Sign {
        Sign::for_player_index(self.current_player_index())
    }

    /// Sign owned by `player`, if they take part in this game.
    ///
    /// When both seats hold the same identity the first seat's sign is
    /// returned.
    #[instrument(skip(self))]
    pub fn sign_of(&self, player: Pubkey) -> Option<Sign> {
        self.players
            .iter()
            .position(|p| *p == player)
            .map(Sign::for_player_index)
    }

    /// Identity holding `sign`.
    pub fn player_with(&self, sign: Sign) -> Pubkey {
        match sign {
            Sign::X => self.players[0],
            Sign::O => self.players[1],
        }
    }

    /// Returns true while moves are accepted.
    pub fn is_active(&self) -> bool {
        self.state == GameState::Active
    }

    /// Returns the winner if the game has been won.
    pub fn winner(&self) -> Option<Pubkey> {
        match self.state {
            GameState::Won { winner } => Some(winner),
            GameState::Active | GameState::Tie => None,
        }
    }

    /// Number of accepted moves so far.
    pub fn moves_played(&self) -> usize {
        usize::from(self.turn.saturating_sub(1))
    }

    /// Renders the record as pretty JSON for diagnostics.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
