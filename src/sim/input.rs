//! Pointer interpretation and per-round rotation counters

use serde::{Deserialize, Serialize};

use super::combination::Direction;

/// Classify a pointer-down on the handle.
///
/// `local_x` is measured from the handle's own origin. Right half turns
/// clockwise; the left half and the exact center turn counterclockwise.
#[inline]
pub fn on_pointer_down(local_x: f32) -> Direction {
    if local_x > 0.0 {
        Direction::Clockwise
    } else {
        Direction::CounterClockwise
    }
}

/// How clicks in mixed directions count toward a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvershootPolicy {
    /// Every click counts regardless of direction. The committed step takes
    /// the direction of the click that reaches the target.
    #[default]
    Accumulate,
    /// A click in a new direction starts the count over at 1
    ResetOnDirectionChange,
}

/// Clicks accumulated since the last committed step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RotationSession {
    pub current_rotation_count: u8,
    pub last_direction: Option<Direction>,
}

impl RotationSession {
    /// Count one click. Returns the count after the click.
    pub fn register_click(&mut self, direction: Direction, policy: OvershootPolicy) -> u8 {
        if policy == OvershootPolicy::ResetOnDirectionChange
            && self.last_direction.is_some_and(|last| last != direction)
        {
            self.current_rotation_count = 0;
        }
        self.current_rotation_count = self.current_rotation_count.saturating_add(1);
        self.last_direction = Some(direction);
        self.current_rotation_count
    }

    /// Zero the count after a commit; the last direction is kept
    pub fn clear_count(&mut self) {
        self.current_rotation_count = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
