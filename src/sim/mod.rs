//! Deterministic puzzle simulation
//!
//! All game logic lives here. This module must stay pure and deterministic:
//! - Time only arrives through `advance(dt)`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod animation;
pub mod combination;
pub mod countdown;
pub mod input;
pub mod matcher;
pub mod state;
pub mod tick;

pub use animation::{AnimKind, AnimStep, AnimTarget, AnimationSequence, Easing, SequenceId, SequenceKind};
pub use combination::{Combination, CombinationStep, Direction};
pub use countdown::{Countdown, CountdownSignal, Deadline};
pub use input::{OvershootPolicy, RotationSession, on_pointer_down};
pub use matcher::{MatchOutcome, record_step};
pub use state::{Command, PendingTransition, PuzzleSession, RoundState};
pub use tick::{TickInput, tick};
