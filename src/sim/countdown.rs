//! Round countdown and one-shot deadlines
//!
//! Both are driven by elapsed time handed in by the frame loop, so the
//! simulation stays deterministic and testable without a real clock.

use serde::{Deserialize, Serialize};

/// Emitted by the countdown as it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownSignal {
    /// One second elapsed; carries the seconds left for display
    Tick(u32),
    /// Reached zero. Fired exactly once per run.
    TimeUp,
}

/// Per-round countdown with a repeating one-second tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    running: bool,
    /// Time since the last whole-second tick
    #[serde(skip)]
    phase: f32,
}

impl Countdown {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            running: false,
            phase: 0.0,
        }
    }

    /// Restart from the full duration. Replaces any earlier tick schedule.
    pub fn start(&mut self) {
        self.remaining = self.duration;
        self.running = true;
        self.phase = 0.0;
    }

    /// Cancel the tick schedule, keeping the remaining time
    pub fn stop(&mut self) {
        self.running = false;
        self.phase = 0.0;
    }

    pub fn reset(&mut self) {
        self.stop();
        self.remaining = self.duration;
    }

    /// Count down one second. A running countdown already at zero times out.
    pub fn tick(&mut self) -> Option<CountdownSignal> {
        if !self.running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.stop();
            Some(CountdownSignal::TimeUp)
        } else {
            Some(CountdownSignal::Tick(self.remaining))
        }
    }

    /// Advance by `dt` seconds, ticking once per whole second elapsed.
    ///
    /// Signals are appended in order. Nothing is emitted after `TimeUp`.
    pub fn advance(&mut self, dt: f32, signals: &mut Vec<CountdownSignal>) {
        if !self.running {
            return;
        }
        self.phase += dt;
        while self.running && self.phase >= 1.0 {
            self.phase -= 1.0;
            if let Some(signal) = self.tick() {
                signals.push(signal);
            }
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }
}

/// A single pending callback time. Arming replaces, never stacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Deadline {
    remaining: Option<f32>,
}

impl Deadline {
    pub fn arm(&mut self, seconds: f32) {
        self.remaining = Some(seconds.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance by `dt`; returns true once, on the call that crosses zero
    pub fn advance(&mut self, dt: f32) -> bool {
        match self.remaining {
            Some(left) if left - dt <= 0.0 => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - dt);
                false
            }
            None => false,
        }
    }
}
