//! Executes game instructions against an account store.
//!
//! Every instruction is load, decode, run the engine, encode, then a single
//! compare-and-persist. Nothing is written unless the engine accepts.

use crate::store::{AccountStore, StoreError};
use derive_more::{Display, Error, From};
use ledger_tictactoe::{GameEngine, GameError, GameRecord, LayoutError, Pubkey, Tile};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// A signed request from a client, already verified by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Allocate `game` and start a match.
    SetupGame {
        /// Address of the new game account.
        game: Pubkey,
        /// Signer; pays for the account and moves first.
        player_one: Pubkey,
        /// Opponent.
        player_two: Pubkey,
    },
    /// Submit a move.
    Play {
        /// Address of the game account.
        game: Pubkey,
        /// Signer submitting the move.
        player: Pubkey,
        /// Target cell.
        tile: Tile,
    },
}

/// Why an instruction failed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum ProcessorError {
    /// The engine rejected the move.
    #[display("Game error {}: {}", _0.code(), _0)]
    Game(GameError),
    /// The stored account is not a valid game record.
    #[display("Layout error: {}", _0)]
    Layout(LayoutError),
    /// The store refused the operation.
    #[display("Store error: {}", _0)]
    Store(StoreError),
}

impl ProcessorError {
    /// Numeric code for engine rejections.
    pub fn code(&self) -> Option<u32> {
        match self {
            ProcessorError::Game(e) => Some(e.code()),
            ProcessorError::Layout(_) | ProcessorError::Store(_) => None,
        }
    }
}

/// Runs instructions against `S`.
#[derive(Debug)]
pub struct Processor<S> {
    store: S,
    account_space: usize,
}

impl<S: AccountStore> Processor<S> {
    /// Creates a processor allocating `account_space` bytes per game.
    ///
    /// Spaces smaller than [`GameRecord::LEN`] are raised to it.
    pub fn new(store: S, account_space: usize) -> Self {
        Self {
            store,
            account_space: account_space.max(GameRecord::LEN),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Executes one instruction and returns the persisted record.
    #[instrument(skip(self))]
    pub fn process(&self, instruction: Instruction) -> Result<GameRecord, ProcessorError> {
        match instruction {
            Instruction::SetupGame {
                game,
                player_one,
                player_two,
            } => self.setup_game(game, player_one, player_two),
            Instruction::Play { game, player, tile } => self.play(game, player, tile),
        }
    }

    /// Loads and decodes the record at `game`.
    #[instrument(skip_all, fields(game = %game))]
    pub fn fetch(&self, game: Pubkey) -> Result<GameRecord, ProcessorError> {
        let account = self.store.load(game)?;
        Ok(GameRecord::from_bytes(account.data())?)
    }

    fn setup_game(
        &self,
        game: Pubkey,
        player_one: Pubkey,
        player_two: Pubkey,
    ) -> Result<GameRecord, ProcessorError> {
        self.store.allocate(game, player_one, self.account_space)?;

        let record = GameEngine::setup_game(player_one, player_two);
        let mut data = vec![0u8; self.account_space];
        record.write_to(&mut data)?;
        self.store.compare_and_persist(game, 0, data)?;

        info!(game = %game, "Game created");
        Ok(record)
    }

    fn play(&self, game: Pubkey, player: Pubkey, tile: Tile) -> Result<GameRecord, ProcessorError> {
        let account = self.store.load(game)?;
        let record = GameRecord::from_bytes(account.data())?;

        let next = GameEngine::play(&record, player, tile).inspect_err(|e| {
            warn!(game = %game, code = e.code(), "Move rejected, nothing persisted");
        })?;

        let mut data = account.data().clone();
        next.write_to(&mut data)?;
        let version = self
            .store
            .compare_and_persist(game, *account.version(), data)?;

        info!(game = %game, version, turn = next.turn(), "Move persisted");
        Ok(next)
    }
}
