//! Tween playback for animation sequences
//!
//! The presenter owns a [`Pose`] and plays [`AnimationSequence`]s against it,
//! one step at a time, reporting the sequence id once when the last step ends.

use crate::sim::{AnimKind, AnimStep, AnimTarget, AnimationSequence, Easing, SequenceId};

/// Map linear progress `t` in [0, 1] through an easing curve
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        Easing::Linear => t,
        Easing::Power1InOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::Power2InOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }
    }
}

/// A single value moving from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub easing: Easing,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            elapsed: 0.0,
        }
    }

    /// Step forward and return the current value
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = ease(self.easing, self.elapsed / self.duration);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Animated properties of the door scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Handle and shadow rotation (radians)
    pub handle_angle: f32,
    /// Handle scale relative to its layout scale
    pub handle_scale: f32,
    /// Door scale relative to its layout scale
    pub door_scale: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            handle_angle: 0.0,
            handle_scale: 1.0,
            door_scale: 1.0,
        }
    }
}

impl Pose {
    fn slot(&mut self, step: &AnimStep) -> Option<&mut f32> {
        match (step.kind, step.target) {
            (AnimKind::RotateTo(_), _) => Some(&mut self.handle_angle),
            (AnimKind::ScaleTo(_), AnimTarget::Handle) => Some(&mut self.handle_scale),
            (AnimKind::ScaleTo(_), AnimTarget::Door) => Some(&mut self.door_scale),
            (AnimKind::Hold, _) => None,
        }
    }
}

/// Plays one sequence step by step
#[derive(Debug, Clone)]
pub struct SequencePlayer {
    sequence: AnimationSequence,
    index: usize,
    current: Option<Tween>,
    held: f32,
    finished: bool,
}

impl SequencePlayer {
    pub fn new(sequence: AnimationSequence) -> Self {
        Self {
            sequence,
            index: 0,
            current: None,
            held: 0.0,
            finished: false,
        }
    }

    pub fn id(&self) -> SequenceId {
        self.sequence.id
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Step being played, `None` once the sequence is over
    pub fn current_step(&self) -> Option<&AnimStep> {
        if self.finished {
            return None;
        }
        self.sequence.steps.get(self.index)
    }

    /// Advance playback and write into `pose`.
    ///
    /// Returns the sequence id on the call that finishes the last step, and
    /// `None` before and after.
    pub fn advance(&mut self, mut dt: f32, pose: &mut Pose) -> Option<SequenceId> {
        if self.finished {
            return None;
        }

        while let Some(step) = self.sequence.steps.get(self.index).copied() {
            let used = match step.kind {
                AnimKind::Hold => {
                    let remaining = step.duration - self.held;
                    if dt < remaining {
                        self.held += dt;
                        return None;
                    }
                    remaining
                }
                AnimKind::RotateTo(to) | AnimKind::ScaleTo(to) => {
                    let tween = self.current.get_or_insert_with(|| {
                        let from = pose.slot(&step).map_or(to, |v| *v);
                        Tween::new(from, to, step.duration, step.easing)
                    });
                    let before = tween.elapsed;
                    let value = tween.advance(dt);
                    let used = tween.elapsed - before;
                    let finished = tween.is_finished();
                    if let Some(slot) = pose.slot(&step) {
                        *slot = value;
                    }
                    if !finished {
                        return None;
                    }
                    used
                }
            };

            dt = (dt - used).max(0.0);
            self.index += 1;
            self.current = None;
            self.held = 0.0;
        }

        self.finished = true;
        Some(self.sequence.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn test_ease_endpoints() {
        for easing in [Easing::Linear, Easing::Power1InOut, Easing::Power2InOut] {
            assert_eq!(ease(easing, 0.0), 0.0);
            assert!((ease(easing, 1.0) - 1.0).abs() < 1e-6);
            assert!((ease(easing, 0.5) - 0.5).abs() < 1e-6);
        }
        assert!(ease(Easing::Power2InOut, 0.25) < ease(Easing::Linear, 0.25));
    }

    #[test]
    fn test_tween_clamps_at_end() {
        let mut tween = Tween::new(0.0, 10.0, 1.0, Easing::Linear);
        assert!((tween.advance(0.5) - 5.0).abs() < 1e-6);
        assert_eq!(tween.advance(5.0), 10.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn test_sequence_plays_in_order_and_reports_once() {
        let seq = AnimationSequence::wrong_combination(7);
        let mut player = SequencePlayer::new(seq);
        let mut pose = Pose::default();

        assert_eq!(player.advance(0.5, &mut pose), None);
        assert!(pose.handle_angle > 0.0 && pose.handle_angle < 2.0 * TAU);

        assert_eq!(player.advance(0.5, &mut pose), None);
        assert!((pose.handle_angle - 2.0 * TAU).abs() < 1e-4);

        // Second step starts from where the first left off
        assert_eq!(player.advance(0.25, &mut pose), None);
        assert!(pose.handle_angle < 2.0 * TAU);

        assert_eq!(player.advance(0.25, &mut pose), Some(7));
        assert_eq!(pose.handle_angle, 0.0);
        assert_eq!(player.advance(1.0, &mut pose), None);
        assert!(player.is_finished());
    }

    #[test]
    fn test_hold_step_delays_completion() {
        let mut player = SequencePlayer::new(AnimationSequence::time_up(3, 1.0));
        let mut pose = Pose::default();
        assert_eq!(player.advance(1.5, &mut pose), None);
        assert_eq!(pose.handle_angle, 0.0);
        assert_eq!(player.advance(0.9, &mut pose), None);
        assert_eq!(player.advance(0.2, &mut pose), Some(3));
    }

    #[test]
    fn test_door_open_pulse_scales_handle() {
        let mut player = SequencePlayer::new(AnimationSequence::door_open(2));
        let mut pose = Pose {
            handle_angle: 1.5,
            ..Default::default()
        };
        assert_eq!(player.advance(0.5, &mut pose), None);
        assert!(pose.handle_scale < 1.0 && pose.handle_scale > 0.1);

        assert_eq!(player.advance(0.5, &mut pose), None);
        assert!((pose.handle_scale - 0.1).abs() < 1e-6);

        assert_eq!(player.advance(1.0, &mut pose), Some(2));
        assert!((pose.handle_scale - 1.0).abs() < 1e-6);
        // Rotation is left to whoever spins the handle
        assert_eq!(pose.handle_angle, 1.5);
        assert_eq!(pose.door_scale, 1.0);
    }

    #[test]
    fn test_current_step_tracks_playback() {
        let mut player = SequencePlayer::new(AnimationSequence::door_close(1));
        let mut pose = Pose::default();
        assert_eq!(player.current_step().map(|s| s.target), Some(AnimTarget::Door));
        player.advance(0.2, &mut pose);
        assert_eq!(player.current_step().map(|s| s.target), Some(AnimTarget::Handle));
        player.advance(0.5, &mut pose);
        assert!(player.current_step().is_none());
    }

    #[test]
    fn test_door_close_rescales_door() {
        let mut player = SequencePlayer::new(AnimationSequence::door_close(1));
        let mut pose = Pose {
            handle_angle: 3.0,
            door_scale: 0.5,
            ..Default::default()
        };
        assert_eq!(player.advance(0.2, &mut pose), None);
        assert_eq!(pose.door_scale, 1.0);
        assert_eq!(pose.handle_angle, 3.0);
        assert_eq!(player.advance(0.5, &mut pose), Some(1));
        assert_eq!(pose.handle_angle, 0.0);
    }
}
