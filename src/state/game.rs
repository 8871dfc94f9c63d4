use rand::seq::IndexedRandom;
use serde::Serialize;
use utoipa::ToSchema;

/// A move in the rock-paper-scissors dominance relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Move {
    /// Rock beats scissors.
    Rock,
    /// Paper beats rock.
    Paper,
    /// Scissors beats paper.
    Scissors,
}

impl Move {
    /// Draw a uniformly random move for the machine player.
    pub fn random() -> Self {
        const MOVES: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];
        *MOVES.choose(&mut rand::rng()).unwrap_or(&MOVES[0])
    }

    /// The move this move defeats.
    pub fn beats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Scissors => Move::Paper,
            Move::Paper => Move::Rock,
        }
    }

    /// Parse a lowercase classifier label into a move.
    pub fn from_label(label: &str) -> Option<Move> {
        match label {
            "rock" => Some(Move::Rock),
            "paper" => Some(Move::Paper),
            "scissors" => Some(Move::Scissors),
            _ => None,
        }
    }

    /// Lowercase classifier label for this move.
    pub fn label(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

/// Who a completed round is credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The human's move dominated the machine's.
    Human,
    /// The machine's move dominated the human's.
    Arduino,
    /// Both players showed the same move.
    Draw,
    /// No valid gesture was locked in; nobody scores.
    NoDetection,
}

/// Decide a round from the locked human move and the machine's draw.
pub fn resolve(human: Option<Move>, arduino: Move) -> Outcome {
    match human {
        None => Outcome::NoDetection,
        Some(h) if h == arduino => Outcome::Draw,
        Some(h) if h.beats() == arduino => Outcome::Human,
        Some(_) => Outcome::Arduino,
    }
}

/// Aggregate win/loss/draw counters for the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    /// Rounds won by the human player.
    pub human_wins: u32,
    /// Rounds won by the machine.
    pub arduino_wins: u32,
    /// Rounds where both players showed the same move.
    pub draws: u32,
}

impl ScoreBoard {
    /// Credit the counter matching `outcome`; `NoDetection` credits nobody.
    pub fn credit(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Human => self.human_wins += 1,
            Outcome::Arduino => self.arduino_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::NoDetection => {}
        }
    }
}

/// Most recent gesture reported by the classifier, with its confidence.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LiveDetection {
    /// Best gesture currently in view, if any.
    pub label: Option<Move>,
    /// Confidence of that gesture, in `[0, 1]`.
    pub confidence: f64,
}

/// Immutable log entry describing one completed round.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    /// 1-based ordinal of the round.
    pub round: u32,
    /// Resolved human move, absent when nothing valid was locked in.
    pub human_move: Option<Move>,
    /// The machine's randomly drawn move.
    pub arduino_move: Move,
    /// Who the round was credited to.
    pub winner: Outcome,
    /// Confidence captured when the detection was locked.
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominance_relation_is_cyclic() {
        assert_eq!(Move::Rock.beats(), Move::Scissors);
        assert_eq!(Move::Scissors.beats(), Move::Paper);
        assert_eq!(Move::Paper.beats(), Move::Rock);
    }

    #[test]
    fn labels_round_trip() {
        for mv in [Move::Rock, Move::Paper, Move::Scissors] {
            assert_eq!(Move::from_label(mv.label()), Some(mv));
        }
        assert_eq!(Move::from_label("lizard"), None);
        assert_eq!(Move::from_label("Rock"), None);
    }

    #[test]
    fn human_rock_loses_to_machine_paper() {
        assert_eq!(resolve(Some(Move::Rock), Move::Paper), Outcome::Arduino);
    }

    #[test]
    fn human_rock_beats_machine_scissors() {
        assert_eq!(resolve(Some(Move::Rock), Move::Scissors), Outcome::Human);
        assert_eq!(resolve(Some(Move::Paper), Move::Rock), Outcome::Human);
        assert_eq!(resolve(Some(Move::Scissors), Move::Paper), Outcome::Human);
    }

    #[test]
    fn equal_moves_draw() {
        assert_eq!(resolve(Some(Move::Rock), Move::Rock), Outcome::Draw);
    }

    #[test]
    fn absent_human_move_is_no_detection() {
        assert_eq!(resolve(None, Move::Scissors), Outcome::NoDetection);
    }

    #[test]
    fn scoreboard_credits_exactly_one_counter() {
        let mut scores = ScoreBoard::default();
        scores.credit(Outcome::Human);
        scores.credit(Outcome::Arduino);
        scores.credit(Outcome::Draw);
        scores.credit(Outcome::NoDetection);
        assert_eq!(scores.human_wins, 1);
        assert_eq!(scores.arduino_wins, 1);
        assert_eq!(scores.draws, 1);
    }

    #[test]
    fn moves_serialize_capitalized_and_outcomes_snake_case() {
        assert_eq!(serde_json::to_value(Move::Rock).unwrap(), "Rock");
        assert_eq!(
            serde_json::to_value(Outcome::NoDetection).unwrap(),
            "no_detection"
        );
    }
}
