//! Event dispatch for the puzzle session
//!
//! Pointer presses, animation completions and elapsed time are the only ways
//! state changes. The frame loop gathers them into a `TickInput` and calls
//! [`tick`] once per frame.

use super::animation::SequenceId;
use super::countdown::CountdownSignal;
use super::input::on_pointer_down;
use super::matcher::{MatchOutcome, record_step};
use super::state::{Command, PuzzleSession, RoundState};
use crate::consts::HANDLE_STEP_ANGLE;

/// Input events collected since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer-down positions on the handle, in handle-local x, oldest first
    pub pointer_downs: Vec<f32>,
    /// Animation sequences the presenter finished playing
    pub completed_sequences: Vec<SequenceId>,
    /// Close an open door now instead of waiting for the auto-close
    pub force_close: bool,
}

impl TickInput {
    /// Clear one-shot events after they were processed
    pub fn clear(&mut self) {
        self.pointer_downs.clear();
        self.completed_sequences.clear();
        self.force_close = false;
    }
}

/// Apply queued events, then advance time by `dt` seconds
pub fn tick(session: &mut PuzzleSession, input: &TickInput, dt: f32) {
    for &local_x in &input.pointer_downs {
        session.pointer_down(local_x);
    }
    for &id in &input.completed_sequences {
        session.sequence_complete(id);
    }
    if input.force_close {
        session.force_close();
    }
    session.advance(dt);
}

impl PuzzleSession {
    /// Handle a press on the handle. Dropped unless a round is counting down
    /// and no transition animation is playing.
    pub fn pointer_down(&mut self, local_x: f32) {
        if !self.accepts_input() {
            log::trace!("Ignoring handle press in {:?}", self.round);
            return;
        }

        let direction = on_pointer_down(local_x);
        self.handle_angle += HANDLE_STEP_ANGLE * direction.sign();
        self.push(Command::PlayRotate {
            direction,
            target_angle: self.handle_angle,
        });

        let policy = self.config.overshoot;
        match record_step(
            direction,
            &mut self.rotation,
            &mut self.input,
            &self.combination,
            policy,
        ) {
            MatchOutcome::Continue => {}
            MatchOutcome::Correct => self.open_door(),
            MatchOutcome::Incorrect => self.reject_combination(),
        }
    }

    /// The presenter finished an animation sequence
    pub fn sequence_complete(&mut self, id: SequenceId) {
        match self.pending {
            Some(pending) if pending.id == id => {
                log::debug!("Sequence {} ({:?}) complete", id, pending.kind);
                self.reset_round();
            }
            Some(pending) => {
                log::warn!("Stale sequence completion {} (waiting on {})", id, pending.id);
            }
            None => {
                log::warn!("Sequence completion {} with nothing pending", id);
            }
        }
    }

    /// Close the door early. No effect unless the door is open.
    pub fn force_close(&mut self) {
        if self.round == RoundState::DoorOpen {
            log::info!("Forced door close");
            self.close_door();
        }
    }

    /// Advance timers by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if self.start_delay.advance(dt) && self.round == RoundState::WaitingToStart {
            log::info!(
                "Timer has started! You have {} sec...",
                self.countdown.duration()
            );
            // The countdown starts at the frame boundary; the rest of `dt` is dropped
            self.begin_countdown();
            return;
        }

        let mut signals = Vec::new();
        self.countdown.advance(dt, &mut signals);
        for signal in signals {
            match signal {
                CountdownSignal::Tick(left) => self.push(Command::ShowTimerText(left.to_string())),
                CountdownSignal::TimeUp => {
                    self.push(Command::ShowTimerText("0".to_string()));
                    self.time_up();
                }
            }
        }

        if self.auto_close.advance(dt) {
            self.close_door();
        }
    }
}
