//! The game engine: `setup_game` and `play`.
//!
//! The engine is a pure function of `(record, input)`. It never performs I/O
//! and never mutates the record it is given; an accepted play returns a new
//! record, a rejected one returns the reason and leaves the caller holding
//! the original.

use crate::action::Play;
use crate::contracts::{Contract, PlayContract};
use crate::error::GameError;
use crate::record::GameRecord;
use crate::rules::{has_won, is_full};
use crate::types::{Cell, GameState, Pubkey, Tile};
use tracing::{debug, info, instrument, warn};

/// Entry points for creating and advancing games.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameEngine;

impl GameEngine {
    /// Creates a game between the caller (X, moves first) and `player_two` (O).
    #[instrument(skip_all, fields(player_one = %caller, player_two = %player_two))]
    pub fn setup_game(caller: Pubkey, player_two: Pubkey) -> GameRecord {
        info!("Setting up game");
        GameRecord::new(caller, player_two)
    }

    /// Places the caller's sign on `tile`.
    ///
    /// # Errors
    ///
    /// Checks run in this order and the first failure is returned:
    ///
    /// 1. [`GameError::GameAlreadyOver`] if the game was won or tied.
    /// 2. [`GameError::NotPlayersTurn`] if `caller` is not the player to move.
    /// 3. [`GameError::TileOutOfBounds`] if row or column exceeds 2.
    /// 4. [`GameError::TileAlreadySet`] if the tile carries a sign.
    #[instrument(skip_all, fields(turn = record.turn(), caller = %caller, tile = %tile))]
    pub fn play(record: &GameRecord, caller: Pubkey, tile: Tile) -> Result<GameRecord, GameError> {
        let play = Play::new(caller, tile);

        if let Err(e) = PlayContract::pre(record, &play) {
            warn!(error = e.name(), code = e.code(), "Play rejected");
            return Err(e);
        }

        let sign = record.current_sign();
        let mut next = *record;
        next.board.set(tile, Cell::Marked(sign));

        if has_won(&next.board, sign) {
            next.state = GameState::Won { winner: caller };
            info!(%sign, "Game won");
        } else if is_full(&next.board) {
            next.state = GameState::Tie;
            info!("Game tied");
        }
        next.turn += 1;

        debug!(next_turn = next.turn, %sign, "Play accepted");

        #[cfg(debug_assertions)]
        crate::contracts::assert_postconditions(record, &next);

        Ok(next)
    }

    /// Validates a play without applying it.
    #[instrument(skip(record))]
    pub fn validate(record: &GameRecord, play: &Play) -> Result<(), GameError> {
        PlayContract::pre(record, play)
    }
}
