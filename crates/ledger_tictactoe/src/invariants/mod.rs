//! First-class invariants for game records.
//!
//! Invariants are logical properties that every persisted record must
//! satisfy. The engine checks them after each move in debug builds and the
//! layout decoder checks them on every load.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description)
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for triples of invariants, the shape of [`RecordInvariants`].
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns every violation, not just the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let checks: [(fn(&S) -> bool, &'static str); 3] = [
            (I1::holds, I1::description()),
            (I2::holds, I2::description()),
            (I3::holds, I3::description()),
        ];
        let violations: Vec<_> = checks
            .into_iter()
            .filter(|(holds, _)| !holds(state))
            .map(|(_, description)| InvariantViolation::new(description))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod alternating_marks;
pub mod filled_matches_turn;
pub mod terminal_consistent;

pub use alternating_marks::AlternatingMarksInvariant;
pub use filled_matches_turn::FilledMatchesTurnInvariant;
pub use terminal_consistent::TerminalConsistentInvariant;

/// Every invariant a persisted record must satisfy.
pub type RecordInvariants = (
    FilledMatchesTurnInvariant,
    AlternatingMarksInvariant,
    TerminalConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, GameEngine, Pubkey, Sign, Tile};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let record = GameEngine::setup_game(Pubkey::new_unique(), Pubkey::new_unique());
        assert!(RecordInvariants::check_all(&record).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let record = GameEngine::setup_game(a, b);
        let record = GameEngine::play(&record, a, Tile::new(0, 0)).unwrap();
        let record = GameEngine::play(&record, b, Tile::new(1, 1)).unwrap();
        let record = GameEngine::play(&record, a, Tile::new(0, 2)).unwrap();

        assert!(RecordInvariants::check_all(&record).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let mut record = GameEngine::setup_game(a, b);
        record.board.set(Tile::new(0, 0), Cell::Marked(Sign::O));

        let violations = RecordInvariants::check_all(&record).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
