//! Puzzle session state and round transitions
//!
//! One `PuzzleSession` owns everything that changes during play. The
//! presentation layer only reads it and drains the commands it queues.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animation::{AnimationSequence, SequenceId, SequenceKind};
use super::combination::{Combination, CombinationStep, Direction};
use super::countdown::{Countdown, Deadline};
use super::input::RotationSession;
use crate::consts::{DOOR_OPEN_TEXT, TIME_UP_TEXT};
use crate::settings::GameConfig;

/// Where the current round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Launched, first countdown not started yet
    WaitingToStart,
    /// Timer running, handle accepts input
    CountingDown,
    /// Correct combination entered; handle locked until the door closes
    DoorOpen,
    /// Countdown hit zero; shown until the reset spin finishes
    TimedOut,
}

/// Fire-and-forget instructions for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Turn the handle to an absolute angle (radians)
    PlayRotate {
        direction: Direction,
        target_angle: f32,
    },
    ShowTimerText(String),
    /// Open the door and play the pulse. No completion is expected.
    PlayDoorOpen(AnimationSequence),
    /// Close the door; report completion with the sequence id
    PlayDoorClose(AnimationSequence),
    /// Wrong-combination or time-up spin; report completion with the sequence id
    PlaySpinReset(AnimationSequence),
    SpawnDecorations,
    ClearDecorations,
    SetHandleInteractive(bool),
}

/// A transition waiting on its animation to finish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub id: SequenceId,
    pub kind: SequenceKind,
}

/// The whole puzzle: secret, progress, timers and queued commands
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    /// Run seed for reproducibility
    pub(super) seed: u64,
    pub(super) rng: Pcg32,
    pub(super) config: GameConfig,
    pub(super) round: RoundState,
    pub(super) combination: Combination,
    /// Steps committed this round
    pub(super) input: Vec<CombinationStep>,
    pub(super) rotation: RotationSession,
    pub(super) countdown: Countdown,
    pub(super) start_delay: Deadline,
    pub(super) auto_close: Deadline,
    /// Absolute handle angle (radians); unbounded so spins read naturally
    pub(super) handle_angle: f32,
    pub(super) pending: Option<PendingTransition>,
    pub(super) next_sequence_id: SequenceId,
    /// Rounds started since launch
    pub(super) rounds: u32,
    pub(super) commands: Vec<Command>,
}

impl PuzzleSession {
    /// Create a session that will start its first round after the configured delay
    pub fn new(seed: u64, config: GameConfig) -> Self {
        let config = config.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let combination = Combination::generate(&mut rng);
        let mut start_delay = Deadline::default();
        start_delay.arm(config.start_delay_seconds);

        let mut session = Self {
            seed,
            rng,
            countdown: Countdown::new(config.round_seconds),
            config,
            round: RoundState::WaitingToStart,
            combination,
            input: Vec::with_capacity(crate::consts::COMBINATION_LEN),
            rotation: RotationSession::default(),
            start_delay,
            auto_close: Deadline::default(),
            handle_angle: 0.0,
            pending: None,
            next_sequence_id: 1,
            rounds: 0,
            commands: Vec::new(),
        };

        session.reveal_combination("Your secret combination is");
        session.push(Command::ShowTimerText(session.countdown.remaining().to_string()));
        session
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> RoundState {
        self.round
    }

    pub fn combination(&self) -> &Combination {
        &self.combination
    }

    pub fn input(&self) -> &[CombinationStep] {
        &self.input
    }

    pub fn rotation(&self) -> &RotationSession {
        &self.rotation
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn handle_angle(&self) -> f32 {
        self.handle_angle
    }

    pub fn pending(&self) -> Option<PendingTransition> {
        self.pending
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// True while pointer input on the handle is acted on
    pub fn accepts_input(&self) -> bool {
        self.round == RoundState::CountingDown && self.countdown.is_running() && self.pending.is_none()
    }

    /// Whether an auto-close is scheduled
    pub fn auto_close_armed(&self) -> bool {
        self.auto_close.is_armed()
    }

    /// Queued commands, oldest first
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Take all queued commands
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Start a fresh round: new secret, cleared progress, full countdown.
    pub fn reset_round(&mut self) {
        self.combination = Combination::generate(&mut self.rng);
        self.reveal_combination("New combination generated");
        self.auto_close.cancel();
        self.pending = None;
        self.handle_angle = 0.0;
        self.begin_countdown();
    }

    pub(super) fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Enter CountingDown with the current combination
    pub(super) fn begin_countdown(&mut self) {
        self.input.clear();
        self.rotation.reset();
        self.start_delay.cancel();
        self.countdown.start();
        self.round = RoundState::CountingDown;
        self.rounds += 1;

        log::info!(
            "Round {} started - {} seconds on the clock",
            self.rounds,
            self.countdown.remaining()
        );
        self.push(Command::ShowTimerText(self.countdown.remaining().to_string()));
        self.push(Command::SetHandleInteractive(true));
    }

    pub(super) fn open_door(&mut self) {
        log::info!("Correct combination entered!");
        self.round = RoundState::DoorOpen;
        self.countdown.stop();
        self.push(Command::SetHandleInteractive(false));
        self.push(Command::ShowTimerText(DOOR_OPEN_TEXT.to_string()));
        let pulse = AnimationSequence::door_open(self.next_id());
        self.push(Command::PlayDoorOpen(pulse));
        self.push(Command::SpawnDecorations);
        self.auto_close.arm(self.config.auto_close_seconds);
    }

    /// Start closing an open door. Ignored unless the door is open and idle.
    pub(super) fn close_door(&mut self) {
        if self.round != RoundState::DoorOpen || self.pending.is_some() {
            return;
        }
        self.auto_close.cancel();
        let sequence = AnimationSequence::door_close(self.next_id());
        self.pending = Some(PendingTransition {
            id: sequence.id,
            kind: sequence.kind,
        });
        log::info!("Closing door");
        self.push(Command::ClearDecorations);
        self.push(Command::PlayDoorClose(sequence));
    }

    pub(super) fn reject_combination(&mut self) {
        log::info!("Incorrect combination. Try again!");
        self.countdown.stop();
        self.input.clear();
        self.rotation.reset();
        let sequence = AnimationSequence::wrong_combination(self.next_id());
        self.begin_spin_reset(sequence);
    }

    pub(super) fn time_up(&mut self) {
        log::info!("Time's up!");
        self.round = RoundState::TimedOut;
        self.countdown.stop();
        self.push(Command::ShowTimerText(TIME_UP_TEXT.to_string()));
        let sequence = AnimationSequence::time_up(self.next_id(), self.config.reset_hold_seconds);
        self.begin_spin_reset(sequence);
    }

    fn begin_spin_reset(&mut self, sequence: AnimationSequence) {
        self.pending = Some(PendingTransition {
            id: sequence.id,
            kind: sequence.kind,
        });
        self.push(Command::SetHandleInteractive(false));
        self.push(Command::PlaySpinReset(sequence));
    }

    fn next_id(&mut self) -> SequenceId {
        let id = self.next_sequence_id;
        self.next_sequence_id = self.next_sequence_id.wrapping_add(1);
        id
    }

    fn reveal_combination(&self, prefix: &str) {
        if self.config.reveal_combination {
            log::info!("{}: {}", prefix, self.combination);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{COMBINATION_LEN, ROUND_SECONDS};

    #[test]
    fn test_new_session_waits_to_start() {
        let session = PuzzleSession::new(12345, GameConfig::default());
        assert_eq!(session.round(), RoundState::WaitingToStart);
        assert_eq!(session.combination().steps().len(), COMBINATION_LEN);
        assert!(session.input().is_empty());
        assert!(!session.countdown().is_running());
        assert!(!session.accepts_input());
        assert_eq!(
            session.commands(),
            &[Command::ShowTimerText(ROUND_SECONDS.to_string())]
        );
    }

    #[test]
    fn test_reset_round_is_clean() {
        let mut session = PuzzleSession::new(12345, GameConfig::default());
        session.input.push(CombinationStep::new(4, Direction::Clockwise));
        session.rotation.current_rotation_count = 2;
        session.rotation.last_direction = Some(Direction::CounterClockwise);
        session.handle_angle = 3.0;

        for _ in 0..2 {
            session.reset_round();

            assert!(session.input().is_empty());
            assert_eq!(*session.rotation(), RotationSession::default());
            assert_eq!(session.round(), RoundState::CountingDown);
            assert_eq!(session.countdown().remaining(), ROUND_SECONDS);
            assert!(session.countdown().is_running());
            assert_eq!(session.handle_angle(), 0.0);
            assert!(session.pending().is_none());
            assert!(session.accepts_input());
            assert_eq!(session.combination().steps().len(), COMBINATION_LEN);
        }
        assert_eq!(session.rounds(), 2);
    }

    #[test]
    fn test_new_sanitizes_hand_built_config() {
        let config = GameConfig {
            round_seconds: 0,
            start_delay_seconds: -1.0,
            ..Default::default()
        };
        let mut session = PuzzleSession::new(3, config);
        assert_eq!(session.config().round_seconds, 1);
        assert_eq!(session.countdown().duration(), 1);

        session.advance(0.0);
        assert_eq!(session.round(), RoundState::CountingDown);
        session.advance(1.0);
        assert_eq!(session.round(), RoundState::TimedOut);
        assert!(!session.countdown().is_running());
    }

    #[test]
    fn test_reset_round_draws_from_rng() {
        let mut a = PuzzleSession::new(7, GameConfig::default());
        let mut b = PuzzleSession::new(7, GameConfig::default());
        a.reset_round();
        b.reset_round();
        assert_eq!(a.combination(), b.combination());

        // Launch draws the first combination, the reset draws the second
        let mut rng = Pcg32::seed_from_u64(7);
        let first = Combination::generate(&mut rng);
        let second = Combination::generate(&mut rng);
        assert_eq!(PuzzleSession::new(7, GameConfig::default()).combination(), &first);
        assert_eq!(a.combination(), &second);
    }
}
