use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::state::game::{LiveDetection, Move, Outcome, RoundRecord, ScoreBoard};

/// Stages a round moves through from start to finish.
///
/// Transitions are totally ordered per round:
/// `Idle -> Countdown -> Evaluating -> Result -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// No round is running; detection flows freely and a round can start.
    Idle,
    /// Countdown ticks are being published before evaluation.
    Countdown,
    /// The locked detection is being resolved against the machine's move.
    Evaluating,
    /// The completed round's record is held on display.
    Result,
}

/// Error returned when a round is requested while another is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("round already in progress (phase {phase:?})")]
pub struct RoundInProgress {
    /// Phase the store was in when the start request arrived.
    pub phase: RoundPhase,
}

/// Round inputs frozen at the idle-to-countdown transition.
///
/// A by-value copy handed to the round task; a concurrent reset can clear the
/// store's lock flag but never this snapshot.
#[derive(Debug, Clone, Copy)]
pub struct LockedRound {
    /// Gesture on display at lock time, if any.
    pub human: Option<Move>,
    /// Confidence of that gesture at lock time.
    pub confidence: f64,
    /// The machine's move, drawn before the countdown starts.
    pub arduino: Move,
}

/// Authoritative game state. All access goes through the [`AppState`] lock;
/// each method below is one discrete, atomic mutation.
///
/// [`AppState`]: crate::state::AppState
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session score counters.
    pub scores: ScoreBoard,
    /// Ordinal of the most recently completed round.
    pub round_number: u32,
    /// Current phase of the round cycle.
    pub phase: RoundPhase,
    /// Tick currently on display, only meaningful during [`RoundPhase::Countdown`].
    pub countdown: Option<u8>,
    /// Machine move of the in-flight or last round.
    pub arduino_move: Option<Move>,
    /// Resolved human move of the in-flight or last round.
    pub human_move: Option<Move>,
    /// Winner of the in-flight or last round.
    pub winner: Option<Outcome>,
    /// Most recent classifier output.
    pub detection: LiveDetection,
    /// Completed rounds, newest first.
    pub history: Vec<RoundRecord>,
    detection_locked: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            scores: ScoreBoard::default(),
            round_number: 0,
            phase: RoundPhase::Idle,
            countdown: None,
            arduino_move: None,
            human_move: None,
            winner: None,
            detection: LiveDetection::default(),
            history: Vec::new(),
            detection_locked: false,
        }
    }
}

impl GameState {
    /// Fresh all-zero idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a round has frozen the live detection.
    pub fn detection_locked(&self) -> bool {
        self.detection_locked
    }

    /// Overwrite the live detection unless a round has locked it.
    ///
    /// Returns `true` when the stored label changed, so callers can log state
    /// changes without spamming on every repeated report.
    pub fn update_detection(&mut self, label: Move, confidence: f64) -> bool {
        if self.detection_locked {
            return false;
        }
        let prev = self.detection.label;
        self.detection = LiveDetection {
            label: Some(label),
            confidence,
        };
        prev != Some(label)
    }

    /// Admit a new round: freeze the current detection, store the machine's
    /// move, clear the previous round's fields, and enter the countdown with
    /// `first_tick` on display.
    ///
    /// Rejected with [`RoundInProgress`] (and no state change at all) unless
    /// the phase is [`RoundPhase::Idle`].
    pub fn begin_round(
        &mut self,
        arduino: Move,
        first_tick: u8,
    ) -> Result<LockedRound, RoundInProgress> {
        if self.phase != RoundPhase::Idle {
            return Err(RoundInProgress { phase: self.phase });
        }

        self.detection_locked = true;
        let locked = LockedRound {
            human: self.detection.label,
            confidence: self.detection.confidence,
            arduino,
        };

        self.phase = RoundPhase::Countdown;
        self.countdown = Some(first_tick);
        self.arduino_move = Some(arduino);
        self.human_move = None;
        self.winner = None;

        Ok(locked)
    }

    /// Publish the next countdown tick.
    pub fn set_countdown(&mut self, tick: u8) {
        self.countdown = Some(tick);
    }

    /// Leave the countdown and enter evaluation.
    pub fn begin_evaluation(&mut self) {
        self.phase = RoundPhase::Evaluating;
        self.countdown = None;
    }

    /// Record the resolved round in one mutation: moves and winner become
    /// visible, the ordinal advances, exactly one counter is credited (or none
    /// for `NoDetection`), the record is prepended to history, and the phase
    /// moves to [`RoundPhase::Result`].
    pub fn complete_round(&mut self, locked: &LockedRound, winner: Outcome) -> RoundRecord {
        self.human_move = locked.human;
        self.winner = Some(winner);
        self.round_number += 1;
        self.scores.credit(winner);

        let record = RoundRecord {
            round: self.round_number,
            human_move: locked.human,
            arduino_move: locked.arduino,
            winner,
            confidence: locked.confidence,
        };
        self.history.insert(0, record.clone());
        self.phase = RoundPhase::Result;

        record
    }

    /// End the result hold: return to idle and release the detection lock.
    ///
    /// Last move and winner stay visible until the next round clears them.
    pub fn finish_round(&mut self) {
        self.phase = RoundPhase::Idle;
        self.detection_locked = false;
    }

    /// Return to creation-equivalent values, preserving only the live
    /// detection itself.
    ///
    /// Valid in any phase. An in-flight round task is not cancelled; it keeps
    /// its [`LockedRound`] copy and its tail writes may land after this reset.
    pub fn reset(&mut self) {
        self.scores = ScoreBoard::default();
        self.round_number = 0;
        self.phase = RoundPhase::Idle;
        self.countdown = None;
        self.arduino_move = None;
        self.human_move = None;
        self.winner = None;
        self.detection_locked = false;
        self.history.clear();
    }
}
