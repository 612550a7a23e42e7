//! Contract-based validation for plays.
//!
//! Contracts formalize Hoare-style reasoning, `{P} action {Q}`: the
//! precondition decides whether a play is accepted, the postcondition checks
//! that the produced record still satisfies every invariant.

use crate::action::Play;
use crate::error::GameError;
use crate::invariants::{InvariantSet, InvariantViolation, RecordInvariants};
use crate::record::GameRecord;
use tracing::{instrument, warn};

/// Preconditions and postconditions of a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// Precondition: the game has not ended.
pub struct GameIsActive;

impl GameIsActive {
    /// Rejects plays on won or tied games.
    #[instrument(skip(record))]
    pub fn check(record: &GameRecord) -> Result<(), GameError> {
        if record.is_active() {
            Ok(())
        } else {
            Err(GameError::GameAlreadyOver)
        }
    }
}

/// Precondition: the submitter is the player to move.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects plays from anyone but `players[(turn - 1) % 2]`.
    #[instrument(skip(record))]
    pub fn check(play: &Play, record: &GameRecord) -> Result<(), GameError> {
        if play.player == record.current_player() {
            Ok(())
        } else {
            Err(GameError::NotPlayersTurn)
        }
    }
}

/// Precondition: the tile lies on the board.
pub struct TileInBounds;

impl TileInBounds {
    /// Rejects rows or columns outside 0-2.
    #[instrument]
    pub fn check(play: &Play) -> Result<(), GameError> {
        if play.tile.is_in_bounds() {
            Ok(())
        } else {
            Err(GameError::TileOutOfBounds)
        }
    }
}

/// Precondition: the tile is empty.
pub struct TileIsEmpty;

impl TileIsEmpty {
    /// Rejects tiles that already carry a sign.
    #[instrument(skip(record))]
    pub fn check(play: &Play, record: &GameRecord) -> Result<(), GameError> {
        match record.board().get(play.tile) {
            Some(cell) if cell.is_empty() => Ok(()),
            Some(_) => Err(GameError::TileAlreadySet),
            None => Err(GameError::TileOutOfBounds),
        }
    }
}

/// Composite precondition, evaluated in order; the first failure wins.
pub struct LegalPlay;

impl LegalPlay {
    /// Validates all preconditions for a play.
    #[instrument(skip(record))]
    pub fn check(play: &Play, record: &GameRecord) -> Result<(), GameError> {
        GameIsActive::check(record)?;
        PlayersTurn::check(play, record)?;
        TileInBounds::check(play)?;
        TileIsEmpty::check(play, record)?;
        Ok(())
    }
}

/// Contract for plays.
///
/// Preconditions:
/// - Game is active
/// - Submitter is the player to move
/// - Tile is on the board
/// - Tile is empty
///
/// Postconditions:
/// - Turn advanced by exactly one
/// - Players unchanged
/// - Every record invariant holds
pub struct PlayContract;

impl Contract<GameRecord, Play> for PlayContract {
    fn pre(record: &GameRecord, play: &Play) -> Result<(), GameError> {
        LegalPlay::check(play, record)
    }

    fn post(before: &GameRecord, after: &GameRecord) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if after.turn() != &before.turn().saturating_add(1) {
            violations.push(InvariantViolation::new("Turn advances by exactly one"));
        }
        if after.players() != before.players() {
            violations.push(InvariantViolation::new("Players never change"));
        }
        if let Err(mut found) = RecordInvariants::check_all(after) {
            violations.append(&mut found);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            warn!(count = violations.len(), "Play postcondition failed");
            Err(violations)
        }
    }
}

/// Asserts that a play's postconditions hold (panics on violation in debug builds).
#[instrument(skip_all)]
pub fn assert_postconditions(before: &GameRecord, after: &GameRecord) {
    if let Err(violations) = PlayContract::post(before, after) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        debug_assert!(violations.is_empty(), "Postcondition failed: {}", descriptions);
    }
}
