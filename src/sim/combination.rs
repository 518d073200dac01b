//! Secret combination and its generator

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{COMBINATION_LEN, MAX_ROTATIONS, MIN_ROTATIONS};

/// Turning direction of the handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Sign of the rotation (+1 clockwise, -1 counterclockwise)
    pub fn sign(self) -> f32 {
        match self {
            Direction::Clockwise => 1.0,
            Direction::CounterClockwise => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Clockwise => "clockwise",
            Direction::CounterClockwise => "counterclockwise",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a combination: turn the handle `rotation_count` times in `direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationStep {
    pub rotation_count: u8,
    pub direction: Direction,
}

impl CombinationStep {
    pub const fn new(rotation_count: u8, direction: Direction) -> Self {
        Self {
            rotation_count,
            direction,
        }
    }
}

impl fmt::Display for CombinationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.rotation_count, self.direction)
    }
}

/// The secret the player has to reproduce, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    steps: [CombinationStep; COMBINATION_LEN],
}

impl Combination {
    pub const fn new(steps: [CombinationStep; COMBINATION_LEN]) -> Self {
        Self { steps }
    }

    /// Draw a fresh combination from `rng`.
    ///
    /// Counts are uniform over `MIN_ROTATIONS..=MAX_ROTATIONS`, directions are
    /// a fair coin per step.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let steps = std::array::from_fn(|_| {
            let rotation_count = rng.random_range(MIN_ROTATIONS..=MAX_ROTATIONS);
            let direction = if rng.random_bool(0.5) {
                Direction::Clockwise
            } else {
                Direction::CounterClockwise
            };
            CombinationStep::new(rotation_count, direction)
        });
        Self { steps }
    }

    pub fn steps(&self) -> &[CombinationStep] {
        &self.steps
    }

    /// Step the player is expected to enter at `index`, if any
    pub fn get(&self, index: usize) -> Option<&CombinationStep> {
        self.steps.get(index)
    }

    /// Strict ordered comparison against entered steps
    pub fn matches(&self, input: &[CombinationStep]) -> bool {
        input.len() == self.steps.len() && self.steps.iter().zip(input).all(|(a, b)| a == b)
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_display_matches_log_format() {
        let combo = Combination::new([
            CombinationStep::new(3, Direction::Clockwise),
            CombinationStep::new(5, Direction::CounterClockwise),
            CombinationStep::new(2, Direction::Clockwise),
        ]);
        assert_eq!(
            combo.to_string(),
            "3 clockwise, 5 counterclockwise, 2 clockwise"
        );
    }

    #[test]
    fn test_same_seed_same_combination() {
        let a = Combination::generate(&mut Pcg32::seed_from_u64(42));
        let b = Combination::generate(&mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_consecutive_draws_vary() {
        // 100 draws from one stream should not all be identical
        let mut rng = Pcg32::seed_from_u64(7);
        let first = Combination::generate(&mut rng);
        let differs = (0..100).any(|_| Combination::generate(&mut rng) != first);
        assert!(differs);
    }

    #[test]
    fn test_all_counts_and_directions_reachable() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seen_counts = [false; 10];
        let mut seen_cw = false;
        let mut seen_ccw = false;
        for _ in 0..500 {
            for step in Combination::generate(&mut rng).steps() {
                seen_counts[step.rotation_count as usize] = true;
                match step.direction {
                    Direction::Clockwise => seen_cw = true,
                    Direction::CounterClockwise => seen_ccw = true,
                }
            }
        }
        assert!(!seen_counts[0]);
        assert!(seen_counts[1..].iter().all(|&s| s));
        assert!(seen_cw && seen_ccw);
    }

    #[test]
    fn test_matches_requires_order() {
        let combo = Combination::new([
            CombinationStep::new(1, Direction::Clockwise),
            CombinationStep::new(2, Direction::Clockwise),
            CombinationStep::new(3, Direction::Clockwise),
        ]);
        let mut reversed = combo.steps().to_vec();
        reversed.reverse();
        assert!(combo.matches(combo.steps()));
        assert!(!combo.matches(&reversed));
        assert!(!combo.matches(&combo.steps()[..2]));
    }

    #[test]
    fn test_matches_requires_every_count() {
        let combo = Combination::new([
            CombinationStep::new(3, Direction::Clockwise),
            CombinationStep::new(5, Direction::CounterClockwise),
            CombinationStep::new(2, Direction::Clockwise),
        ]);
        for slot in 0..COMBINATION_LEN {
            let mut attempt = combo.steps().to_vec();
            attempt[slot].rotation_count += 1;
            assert!(!combo.matches(&attempt), "slot {slot} should not match");
        }
    }

    proptest! {
        #[test]
        fn prop_generated_steps_in_range(seed in any::<u64>()) {
            let combo = Combination::generate(&mut Pcg32::seed_from_u64(seed));
            prop_assert_eq!(combo.steps().len(), COMBINATION_LEN);
            for step in combo.steps() {
                prop_assert!((MIN_ROTATIONS..=MAX_ROTATIONS).contains(&step.rotation_count));
            }
        }
    }
}
