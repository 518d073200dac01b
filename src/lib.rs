//! Vault Door - a safe-cracking door puzzle
//!
//! Core modules:
//! - `sim`: Deterministic puzzle state machine (combination, input, countdown, outcomes)
//! - `stage`: Pure presentation helpers (layout, animation sequence playback)
//! - `settings`: Data-driven round timings and input policy

pub mod settings;
pub mod sim;
pub mod stage;

pub use settings::GameConfig;
pub use sim::{Command, Direction, PuzzleSession, RoundState};

/// Game configuration constants
pub mod consts {
    /// Round length in seconds
    pub const ROUND_SECONDS: u32 = 30;
    /// How long the door stays open before closing on its own
    pub const AUTO_CLOSE_SECONDS: f32 = 8.0;
    /// Delay between launch and the first countdown
    pub const START_DELAY_SECONDS: f32 = 8.0;
    /// Pause after the time-up spin before the next round starts
    pub const RESET_HOLD_SECONDS: f32 = 1.0;

    /// Number of steps in a combination
    pub const COMBINATION_LEN: usize = 3;
    /// Smallest rotation count of a step
    pub const MIN_ROTATIONS: u8 = 1;
    /// Largest rotation count of a step
    pub const MAX_ROTATIONS: u8 = 9;

    /// Handle rotation per click (radians)
    pub const HANDLE_STEP_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
    /// Smallest handle scale reached by the door-open pulse
    pub const DOOR_OPEN_PULSE_SCALE: f32 = 0.1;

    /// Design resolution the layout is authored against
    pub const BASE_WIDTH: f32 = 1920.0;
    pub const BASE_HEIGHT: f32 = 1080.0;

    /// Timer text shown while the door is open
    pub const DOOR_OPEN_TEXT: &str = "Door Open";
    /// Timer text shown when the countdown runs out
    pub const TIME_UP_TEXT: &str = "Time's Up!";
}
