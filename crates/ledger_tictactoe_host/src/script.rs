//! Scripted matches replayed through the processor.

use crate::config::{ConfigError, HostConfig};
use crate::processor::{Instruction, Processor, ProcessorError};
use crate::store::InMemoryStore;
use derive_getters::Getters;
use ledger_tictactoe::{GameRecord, Pubkey, Tile};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Which player submits a scripted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    /// The game creator.
    One,
    /// The invited opponent.
    Two,
}

/// One move in a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedMove {
    /// Submitting seat.
    pub seat: Seat,
    /// Target row.
    pub row: u8,
    /// Target column.
    pub column: u8,
}

/// A match described in TOML.
///
/// ```toml
/// [[moves]]
/// seat = "one"
/// row = 0
/// column = 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct MatchScript {
    /// Identity of seat one; generated when absent.
    #[serde(default)]
    player_one: Option<Pubkey>,
    /// Identity of seat two; generated when absent.
    #[serde(default)]
    player_two: Option<Pubkey>,
    /// Moves in submission order.
    #[serde(default)]
    moves: Vec<ScriptedMove>,
}

impl MatchScript {
    /// Creates a script with generated identities.
    pub fn new(moves: Vec<ScriptedMove>) -> Self {
        Self {
            player_one: None,
            player_two: None,
            moves,
        }
    }

    /// Loads a script from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read script file: {}", e)))?;
        let script: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse script: {}", e)))?;
        debug!(moves = script.moves.len(), "Script loaded");
        Ok(script)
    }
}

/// A move the engine refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Zero-based index into the script's moves.
    pub index: usize,
    /// Numeric error code.
    pub code: u32,
    /// Error name.
    pub name: &'static str,
}

/// What happened when a script ran.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RunReport {
    /// Address the game was created at.
    game: Pubkey,
    /// Record after the last accepted move.
    record: GameRecord,
    /// Records after each accepted move, in order.
    snapshots: Vec<GameRecord>,
    /// Engine rejections, in order.
    rejections: Vec<Rejection>,
}

/// Replays `script` against a fresh in-memory store.
///
/// Engine rejections are collected; with `stop_on_error` the run ends at
/// the first one. Store and layout failures abort the run.
#[instrument(skip_all, fields(moves = script.moves.len()))]
pub fn run_script(config: &HostConfig, script: &MatchScript) -> Result<RunReport, ProcessorError> {
    let processor = Processor::new(InMemoryStore::new(), *config.account_space());
    let game = Pubkey::new_unique();
    let player_one = script.player_one.unwrap_or_else(Pubkey::new_unique);
    let player_two = script.player_two.unwrap_or_else(Pubkey::new_unique);

    let mut record = processor.process(Instruction::SetupGame {
        game,
        player_one,
        player_two,
    })?;
    let mut snapshots = Vec::new();
    let mut rejections = Vec::new();

    for (index, scripted) in script.moves.iter().enumerate() {
        let player = match scripted.seat {
            Seat::One => player_one,
            Seat::Two => player_two,
        };
        let instruction = Instruction::Play {
            game,
            player,
            tile: Tile::new(scripted.row, scripted.column),
        };

        match processor.process(instruction) {
            Ok(next) => {
                record = next;
                snapshots.push(next);
            }
            Err(ProcessorError::Game(e)) => {
                warn!(index, code = e.code(), "Scripted move rejected");
                rejections.push(Rejection {
                    index,
                    code: e.code(),
                    name: e.name(),
                });
                if *config.stop_on_error() {
                    break;
                }
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        accepted = snapshots.len(),
        rejected = rejections.len(),
        "Script finished"
    );
    Ok(RunReport {
        game,
        record,
        snapshots,
        rejections,
    })
}
