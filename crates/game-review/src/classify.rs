//! Move classification: pure functions shared by batch review and the
//! live coach.

use engine_client::EngineScore;
use serde::{Deserialize, Serialize};

/// Classification thresholds (centipawn loss)
const THRESHOLD_EXCELLENT: i32 = 20;
const THRESHOLD_GOOD: i32 = 50;
const THRESHOLD_INACCURACY: i32 = 150;
const THRESHOLD_MISTAKE: i32 = 300;

/// Losses are capped here; beyond this the game is decided anyway.
const MAX_CP_LOSS: i32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Found the engine's move while a forced mate was on the board.
    Great,
    /// The engine's own choice.
    Best,
    Excellent,
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
    /// Had a forced mate and let it slip entirely.
    MissedWin,
    /// Known opening theory, not judged by the engine.
    Book,
    /// The only legal move.
    Forced,
}

impl Classification {
    /// Points used for the per-color accuracy average.
    pub fn points(self) -> u32 {
        match self {
            Classification::Great
            | Classification::Best
            | Classification::Book
            | Classification::Forced => 100,
            Classification::Excellent => 90,
            Classification::Good => 80,
            Classification::Inaccuracy => 50,
            Classification::Mistake => 20,
            Classification::Blunder | Classification::MissedWin => 0,
        }
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            Classification::Great => "Great move!",
            Classification::Best => "Best move!",
            Classification::Excellent => "Excellent",
            Classification::Good => "Good",
            Classification::Inaccuracy => "Inaccuracy",
            Classification::Mistake => "Mistake",
            Classification::Blunder => "Blunder",
            Classification::MissedWin => "Missed win",
            Classification::Book => "Book move",
            Classification::Forced => "Forced",
        }
    }
}

/// Context bits that shape the explanation text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveContext {
    pub is_capture: bool,
    pub is_check: bool,
    pub is_forced: bool,
}

/// Outcome of judging one played move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub classification: Classification,
    /// Centipawn loss against the engine's line; 0 for best moves.
    pub loss: i32,
}

/// Band lookup on capped centipawn loss.
pub fn classify_loss(loss: i32) -> Classification {
    if loss <= THRESHOLD_EXCELLENT {
        Classification::Excellent
    } else if loss <= THRESHOLD_GOOD {
        Classification::Good
    } else if loss <= THRESHOLD_INACCURACY {
        Classification::Inaccuracy
    } else if loss <= THRESHOLD_MISTAKE {
        Classification::Mistake
    } else {
        Classification::Blunder
    }
}

/// Classify a move that matched the engine's best move.
pub fn best_move_verdict(score_before: EngineScore) -> Verdict {
    let classification = if score_before.is_mate_for_mover() {
        Classification::Great
    } else {
        Classification::Best
    };
    Verdict {
        classification,
        loss: 0,
    }
}

/// Classify a non-best move from the evaluation before it and the
/// evaluation after it. `score_after` is relative to the opponent, who is
/// on the move once the move is played.
pub fn judged_verdict(score_before: EngineScore, score_after: EngineScore) -> Verdict {
    let before = score_before.signed_cp();
    // negate to get back to the mover's point of view
    let after = -score_after.signed_cp();
    let loss = (before - after).clamp(0, MAX_CP_LOSS);

    // A mate was on the board and is no longer forced for the mover.
    let mate_slipped = score_before.is_mate_for_mover()
        && !matches!(score_after, EngineScore::Mate(m) if m < 0);
    if mate_slipped {
        return Verdict {
            classification: Classification::MissedWin,
            loss,
        };
    }

    Verdict {
        classification: classify_loss(loss),
        loss,
    }
}

/// Feedback text keyed by classification and move context.
pub fn explanation(classification: Classification, loss: i32, ctx: MoveContext) -> String {
    let base = match classification {
        Classification::Forced => "The only legal move in the position.",
        Classification::Book => "A known opening move.",
        Classification::Great => "You found the forced mate. Great find!",
        Classification::Best => "This is the strongest continuation.",
        Classification::Excellent => "A very strong move. You are playing accurately.",
        Classification::Good => "A solid move that keeps your position together.",
        Classification::Inaccuracy => "There was a better move available, but this is playable.",
        Classification::Mistake => "This hands your opponent a significant advantage.",
        Classification::MissedWin => {
            "You had a forced checkmate and let it slip. Look for checks first!"
        }
        Classification::Blunder => {
            if loss >= MAX_CP_LOSS {
                "This throws away a decisive amount of material or the game itself."
            } else {
                "This move likely hangs a piece or misses a tactical reply."
            }
        }
    };
    match classification {
        Classification::Mistake | Classification::Blunder if ctx.is_capture => {
            format!("{base} The capture does not work tactically.")
        }
        Classification::Inaccuracy | Classification::Mistake if ctx.is_check => {
            format!("{base} The check achieves little here.")
        }
        _ => base.to_string(),
    }
}
