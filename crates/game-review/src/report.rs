//! Review report types and per-color aggregation.

use serde::{Deserialize, Serialize};
use shakmaty::Color;

use crate::classify::Classification;

/// Rating estimate: a clamped linear map from accuracy.
const RATING_BASE: i32 = 200;
const RATING_PER_ACCURACY_POINT: i32 = 26;
const RATING_FLOOR: i32 = 400;
const RATING_CEILING: i32 = 2800;

/// Serializable side marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

/// Analysis of one played move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveAnalysis {
    pub index: usize,
    pub side: Side,
    pub san: String,
    #[serde(rename = "move")]
    pub uci: String,
    /// Evaluation after the move, centipawns from White's perspective.
    pub eval_white: i32,
    /// Moves to mate from White's perspective, when a mate is on the board.
    pub mate_in: Option<i32>,
    /// The engine's preferred move in the pre-move position.
    pub best_move: String,
    pub loss: i32,
    pub classification: Classification,
    pub explanation: String,
}

/// A white/black pair of aggregate numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub white: i32,
    pub black: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameReviewReport {
    pub accuracy: ColorPair,
    pub estimated_rating: ColorPair,
    pub opening: String,
    pub moves: Vec<MoveAnalysis>,
    /// Set when the engine was unavailable or the pass was cut short;
    /// the numbers are then placeholders, not judgments.
    pub degraded: bool,
}

impl GameReviewReport {
    /// Report for input that could not even be parsed.
    pub fn empty() -> Self {
        let accuracy = ColorPair::default();
        GameReviewReport {
            accuracy,
            estimated_rating: estimated_rating(accuracy),
            opening: "Unknown".to_string(),
            moves: Vec::new(),
            degraded: true,
        }
    }
}

/// Per-color rounded average of classification points. A color with no
/// moves scores 0.
pub fn accuracy(moves: &[MoveAnalysis]) -> ColorPair {
    let mut totals = ColorPair::default();
    let mut counts = ColorPair::default();
    for m in moves {
        let points = m.classification.points() as i32;
        match m.side {
            Side::White => {
                totals.white += points;
                counts.white += 1;
            }
            Side::Black => {
                totals.black += points;
                counts.black += 1;
            }
        }
    }
    ColorPair {
        white: rounded_average(totals.white, counts.white),
        black: rounded_average(totals.black, counts.black),
    }
}

fn rounded_average(total: i32, count: i32) -> i32 {
    if count == 0 {
        0
    } else {
        (total as f64 / count as f64).round() as i32
    }
}

/// Map accuracy to a rating estimate, clamped to a plausible range.
pub fn estimated_rating(accuracy: ColorPair) -> ColorPair {
    ColorPair {
        white: estimate(accuracy.white),
        black: estimate(accuracy.black),
    }
}

fn estimate(accuracy: i32) -> i32 {
    (RATING_BASE + RATING_PER_ACCURACY_POINT * accuracy).clamp(RATING_FLOOR, RATING_CEILING)
}
