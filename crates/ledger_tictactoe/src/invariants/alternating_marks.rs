//! Alternating marks invariant: X, O, X, O, ...

use super::Invariant;
use crate::record::GameRecord;
use crate::types::Sign;

/// Invariant: signs were placed alternately, X first.
///
/// After `n` accepted moves X holds `ceil(n / 2)` cells and O holds
/// `floor(n / 2)`.
pub struct AlternatingMarksInvariant;

impl Invariant<GameRecord> for AlternatingMarksInvariant {
    fn holds(record: &GameRecord) -> bool {
        let played = record.moves_played();
        let x_count = record.board().count(Sign::X);
        let o_count = record.board().count(Sign::O);

        x_count == played.div_ceil(2) && o_count == played / 2
    }

    fn description() -> &'static str {
        "Signs alternate (X, O, X, O, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, GameEngine, Pubkey, Tile};

    #[test]
    fn test_alternating_sequence_holds() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let mut record = GameEngine::setup_game(a, b);

        for (i, tile) in [Tile::new(0, 0), Tile::new(1, 1), Tile::new(0, 2), Tile::new(2, 0)]
            .into_iter()
            .enumerate()
        {
            let player = if i % 2 == 0 { a } else { b };
            record = GameEngine::play(&record, player, tile).unwrap();
            assert!(AlternatingMarksInvariant::holds(&record));
        }
    }

    #[test]
    fn test_same_sign_twice_violates() {
        let a = Pubkey::new_unique();
        let record = GameEngine::setup_game(a, Pubkey::new_unique());
        let mut record = GameEngine::play(&record, a, Tile::new(0, 0)).unwrap();

        // Sneak in a second X while keeping the filled count consistent.
        record.board.set(Tile::new(1, 1), Cell::Marked(Sign::X));
        record.turn = 3;
        assert!(!AlternatingMarksInvariant::holds(&record));
    }
}
