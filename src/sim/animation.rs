//! Animation sequences handed to the presentation layer
//!
//! A chained transition (spin, spin back, pause) is described up front as an
//! ordered list of steps. The presenter plays them one after another and
//! reports a single completion for the whole sequence.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::consts::DOOR_OPEN_PULSE_SCALE;

/// Identifies a played sequence so stale completions can be told apart
pub type SequenceId = u32;

/// Which sprite group a step animates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimTarget {
    /// Handle and its shadow together
    Handle,
    /// Closed door sprite
    Door,
}

/// Easing curve for a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic in-out
    Power1InOut,
    /// Cubic in-out
    Power2InOut,
}

/// What a step animates toward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnimKind {
    /// Rotate to an absolute angle (radians)
    RotateTo(f32),
    /// Scale to a factor of the sprite's layout scale
    ScaleTo(f32),
    /// Do nothing for the step's duration
    Hold,
}

/// One tween in a sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimStep {
    pub target: AnimTarget,
    pub kind: AnimKind,
    /// Seconds
    pub duration: f32,
    pub easing: Easing,
}

impl AnimStep {
    pub fn rotate(target: AnimTarget, angle: f32, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            kind: AnimKind::RotateTo(angle),
            duration,
            easing,
        }
    }

    pub fn scale(target: AnimTarget, factor: f32, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            kind: AnimKind::ScaleTo(factor),
            duration,
            easing,
        }
    }

    pub fn hold(duration: f32) -> Self {
        Self {
            target: AnimTarget::Handle,
            kind: AnimKind::Hold,
            duration,
            easing: Easing::Linear,
        }
    }
}

/// Why a sequence was started; decides what happens when it completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceKind {
    /// Spin-reset after an incorrect combination
    WrongCombination,
    /// Spin-reset after the countdown ran out
    TimeUp,
    /// Door closing after it was open
    DoorClose,
    /// Pulse as the door opens; nothing waits on it
    DoorOpen,
}

/// Ordered steps played strictly one after another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSequence {
    pub id: SequenceId,
    pub kind: SequenceKind,
    pub steps: Vec<AnimStep>,
}

impl AnimationSequence {
    /// Two full turns, then back to rest
    pub fn wrong_combination(id: SequenceId) -> Self {
        Self {
            id,
            kind: SequenceKind::WrongCombination,
            steps: vec![
                AnimStep::rotate(AnimTarget::Handle, 2.0 * TAU, 1.0, Easing::Power1InOut),
                AnimStep::rotate(AnimTarget::Handle, 0.0, 0.5, Easing::Power1InOut),
            ],
        }
    }

    /// Same spin as a wrong combination, with a pause so "Time's Up!" can be read
    pub fn time_up(id: SequenceId, hold: f32) -> Self {
        let mut steps = vec![
            AnimStep::rotate(AnimTarget::Handle, 2.0 * TAU, 1.0, Easing::Power2InOut),
            AnimStep::rotate(AnimTarget::Handle, 0.0, 0.5, Easing::Power2InOut),
        ];
        if hold > 0.0 {
            steps.push(AnimStep::hold(hold));
        }
        Self {
            id,
            kind: SequenceKind::TimeUp,
            steps,
        }
    }

    /// Handle shrinks and springs back while the door swings open
    pub fn door_open(id: SequenceId) -> Self {
        Self {
            id,
            kind: SequenceKind::DoorOpen,
            steps: vec![
                AnimStep::scale(AnimTarget::Handle, DOOR_OPEN_PULSE_SCALE, 1.0, Easing::Power1InOut),
                AnimStep::scale(AnimTarget::Handle, 1.0, 1.0, Easing::Power1InOut),
            ],
        }
    }

    /// Door snaps back to size, then the handle returns to rest
    pub fn door_close(id: SequenceId) -> Self {
        Self {
            id,
            kind: SequenceKind::DoorClose,
            steps: vec![
                AnimStep::scale(AnimTarget::Door, 1.0, 0.2, Easing::Power1InOut),
                AnimStep::rotate(AnimTarget::Handle, 0.0, 0.5, Easing::Linear),
            ],
        }
    }

    /// Total playback time in seconds
    pub fn duration(&self) -> f32 {
        self.steps.iter().map(|s| s.duration).sum()
    }
}
