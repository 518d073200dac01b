//! Matching entered steps against the secret combination

use super::combination::{Combination, CombinationStep, Direction};
use super::input::{OvershootPolicy, RotationSession};
use crate::consts::COMBINATION_LEN;

/// Result of feeding one click to the matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Round still in progress (with or without a fresh commit)
    Continue,
    /// All steps entered and every one matched
    Correct,
    /// All steps entered and at least one differs
    Incorrect,
}

impl MatchOutcome {
    pub fn is_complete(self) -> bool {
        !matches!(self, MatchOutcome::Continue)
    }
}

/// Count a click and commit a step once the running count hits the count
/// expected for the next unfilled slot.
///
/// A commit records the direction of the committing click. When the input
/// fills up it is compared step by step, in order, against `combination`.
pub fn record_step(
    direction: Direction,
    session: &mut RotationSession,
    input: &mut Vec<CombinationStep>,
    combination: &Combination,
    policy: OvershootPolicy,
) -> MatchOutcome {
    let Some(expected) = combination.get(input.len()) else {
        // Full input is judged on the commit that fills it; nothing to do here
        return MatchOutcome::Continue;
    };

    let count = session.register_click(direction, policy);
    if count != expected.rotation_count {
        return MatchOutcome::Continue;
    }

    let step = CombinationStep::new(count, direction);
    input.push(step);
    session.clear_count();
    log::debug!("Committed step {}: {}", input.len(), step);

    if input.len() < COMBINATION_LEN {
        MatchOutcome::Continue
    } else if combination.matches(input) {
        MatchOutcome::Correct
    } else {
        MatchOutcome::Incorrect
    }
}
