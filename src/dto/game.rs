use serde::Serialize;
use utoipa::ToSchema;

use crate::state::{
    GameState, RoundPhase,
    game::{Move, Outcome, RoundRecord},
};

/// Flat snapshot of the whole game state served to pollers.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameStateResponse {
    /// Rounds won by the human player.
    pub human_wins: u32,
    /// Rounds won by the machine.
    pub arduino_wins: u32,
    /// Drawn rounds.
    pub draws: u32,
    /// Ordinal of the most recently completed round.
    pub round: u32,
    /// Current phase of the round cycle.
    pub state: RoundPhase,
    /// Countdown tick on display, only present during the countdown.
    pub countdown: Option<u8>,
    /// Machine move of the in-flight or last round.
    pub arduino_move: Option<Move>,
    /// Resolved human move of the in-flight or last round.
    pub human_move: Option<Move>,
    /// Winner of the in-flight or last round.
    pub winner: Option<Outcome>,
    /// Lowercase label of the gesture currently in view, if any.
    pub detection: Option<&'static str>,
    /// Confidence of the current detection.
    pub confidence: f64,
    /// Completed rounds, newest first.
    pub history: Vec<RoundRecord>,
}

impl From<GameState> for GameStateResponse {
    fn from(state: GameState) -> Self {
        Self {
            human_wins: state.scores.human_wins,
            arduino_wins: state.scores.arduino_wins,
            draws: state.scores.draws,
            round: state.round_number,
            state: state.phase,
            countdown: state.countdown,
            arduino_move: state.arduino_move,
            human_move: state.human_move,
            winner: state.winner,
            detection: state.detection.label.map(Move::label),
            confidence: state.detection.confidence,
            history: state.history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_the_polled_api_keys() {
        let mut state = GameState::new();
        state.update_detection(Move::Rock, 0.8);
        let value = serde_json::to_value(GameStateResponse::from(state)).unwrap();

        assert_eq!(value["humanWins"], 0);
        assert_eq!(value["arduinoWins"], 0);
        assert_eq!(value["draws"], 0);
        assert_eq!(value["round"], 0);
        assert_eq!(value["state"], "idle");
        assert_eq!(value["countdown"], serde_json::Value::Null);
        assert_eq!(value["arduinoMove"], serde_json::Value::Null);
        assert_eq!(value["humanMove"], serde_json::Value::Null);
        assert_eq!(value["winner"], serde_json::Value::Null);
        assert_eq!(value["detection"], "rock");
        assert_eq!(value["confidence"], 0.8);
        assert!(value["history"].as_array().unwrap().is_empty());
    }
}
