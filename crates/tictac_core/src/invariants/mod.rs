//! First-class invariants for a game session.
//!
//! Invariants are logical properties that must hold for every session
//! the store hands out. They are checked after each applied move and
//! when a snapshot is decoded, and are testable independently.

mod balanced_marks;
mod derived_status;
mod turn_matches_board;

pub use balanced_marks::BalancedMarksInvariant;
pub use derived_status::DerivedStatusInvariant;
pub use turn_matches_board::TurnMatchesBoardInvariant;

use crate::session::GameSession;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of one or more invariants.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Invariant violation: {}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariants.
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

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Every invariant a session must satisfy.
pub type SessionInvariants = (
    BalancedMarksInvariant,
    DerivedStatusInvariant,
    TurnMatchesBoardInvariant,
);

/// Checks all session invariants, joining violations into one error.
pub fn check_session(session: &GameSession) -> Result<(), InvariantViolation> {
    SessionInvariants::check_all(session).map_err(|violations| {
        let joined = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        tracing::warn!(
            match_id = %session.id(),
            violations = %joined,
            "Session invariants violated"
        );
        InvariantViolation::new(joined)
    })
}
