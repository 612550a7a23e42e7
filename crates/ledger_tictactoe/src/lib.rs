//! Ledger tic-tac-toe - authoritative game logic for account-backed games
//!
//! A game lives in a fixed-layout account record owned by a hosting runtime.
//! This crate is the state machine over that record: it creates games,
//! validates and applies moves, detects wins and ties, and reports typed
//! rejections. It does no I/O; storage, identity verification and
//! transaction submission belong to the host.
//!
//! # Architecture
//!
//! - **Types**: identities, signs, cells, board, tiles, game state
//! - **Record**: the persisted [`GameRecord`] and its derived queries
//! - **Engine**: [`GameEngine::setup_game`] and [`GameEngine::play`]
//! - **Rules**: pure win and tie detection
//! - **Invariants / contracts**: properties every record satisfies and the
//!   pre/postconditions of a play
//! - **Layout**: the fixed binary encoding of a record
//!
//! # Example
//!
//! ```
//! use ledger_tictactoe::{GameEngine, GameError, GameState, Pubkey, Tile};
//!
//! let alice = Pubkey::new_unique();
//! let bob = Pubkey::new_unique();
//!
//! let game = GameEngine::setup_game(alice, bob);
//! let game = GameEngine::play(&game, alice, Tile::new(0, 0)).unwrap();
//! assert_eq!(*game.turn(), 2);
//! assert_eq!(game.state(), &GameState::Active);
//!
//! let rejected = GameEngine::play(&game, alice, Tile::new(1, 1));
//! assert_eq!(rejected, Err(GameError::NotPlayersTurn));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod engine;
mod error;
mod invariants;
mod layout;
mod record;
pub mod rules;
mod types;

// Crate-level exports - Domain types
pub use types::{Board, Cell, GameState, Pubkey, PubkeyParseError, Sign, Tile};

// Crate-level exports - Record and engine
pub use action::Play;
pub use engine::GameEngine;
pub use record::GameRecord;

// Crate-level exports - Errors
pub use error::{ERROR_CODE_OFFSET, GameError};
pub use layout::{DISCRIMINATOR, LayoutError};

// Crate-level exports - Invariants and contracts
pub use contracts::{
    Contract, GameIsActive, LegalPlay, PlayContract, PlayersTurn, TileInBounds, TileIsEmpty,
    assert_postconditions,
};
pub use invariants::{
    AlternatingMarksInvariant, FilledMatchesTurnInvariant, Invariant, InvariantSet,
    InvariantViolation, RecordInvariants, TerminalConsistentInvariant,
};
