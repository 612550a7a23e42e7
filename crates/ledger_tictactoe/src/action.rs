//! First-class action types.
//!
//! A play is a domain event: who wants to put their sign where. It can be
//! validated against a record independently of being applied.

use crate::types::{Pubkey, Tile};
use serde::{Deserialize, Serialize};

/// A player's request to place their sign on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Play {
    /// Identity submitting the move, already verified by the host.
    pub player: Pubkey,
    /// Target cell.
    pub tile: Tile,
}

impl Play {
    /// Creates a play.
    pub fn new(player: Pubkey, tile: Tile) -> Self {
        Self { player, tile }
    }
}

impl std::fmt::Display for Play {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.tile)
    }
}
