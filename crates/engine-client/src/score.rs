//! Engine scores and perspective normalization.
//!
//! UCI engines report scores relative to the side to move in the searched
//! position. Everything downstream wants a fixed perspective, so the
//! conversions live here.

use serde::{Deserialize, Serialize};
use shakmaty::Color;

/// Anchor for mapping mate distances onto the centipawn line.
pub const MATE_SCORE: i32 = 10_000;

/// A score as reported by the engine, relative to the side to move in the
/// position that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum EngineScore {
    /// Centipawns.
    Cp(i32),
    /// Moves until mate; positive when the mover delivers it.
    Mate(i32),
}

impl EngineScore {
    /// Collapse onto a single comparable centipawn line. Any mate for the
    /// mover outranks any centipawn score, and shorter mates rank higher;
    /// mates against the mover mirror that below the centipawn range.
    pub fn signed_cp(self) -> i32 {
        match self {
            EngineScore::Cp(cp) => cp,
            EngineScore::Mate(m) if m > 0 => MATE_SCORE - m * 10,
            EngineScore::Mate(m) => -MATE_SCORE - m * 10,
        }
    }

    /// True when the side to move has a forced mate.
    pub fn is_mate_for_mover(self) -> bool {
        matches!(self, EngineScore::Mate(m) if m > 0)
    }
}

/// Express `score` (relative to `side_to_move`) as centipawns seen from
/// `perspective`.
pub fn to_absolute(score: EngineScore, side_to_move: Color, perspective: Color) -> i32 {
    let cp = score.signed_cp();
    if side_to_move == perspective {
        cp
    } else {
        -cp
    }
}

/// Mate distance seen from `perspective`, if a mate is on the board.
/// Negative means `perspective` is the one getting mated.
pub fn mate_in_for(score: EngineScore, side_to_move: Color, perspective: Color) -> Option<i32> {
    match score {
        EngineScore::Mate(m) => Some(if side_to_move == perspective { m } else { -m }),
        EngineScore::Cp(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mate_outranks_any_cp() {
        assert!(EngineScore::Mate(12).signed_cp() > EngineScore::Cp(2500).signed_cp());
        assert!(EngineScore::Mate(-12).signed_cp() < EngineScore::Cp(-2500).signed_cp());
    }

    #[test]
    fn shorter_mates_rank_higher() {
        assert!(EngineScore::Mate(1).signed_cp() > EngineScore::Mate(3).signed_cp());
        // getting mated later is less bad
        assert!(EngineScore::Mate(-3).signed_cp() > EngineScore::Mate(-1).signed_cp());
    }

    #[test]
    fn absolute_flips_for_the_opponent() {
        let s = EngineScore::Cp(45);
        assert_eq!(to_absolute(s, Color::Black, Color::White), -45);
        assert_eq!(to_absolute(s, Color::White, Color::White), 45);
        assert_eq!(to_absolute(s, Color::Black, Color::Black), 45);
    }

    #[test]
    fn mate_distance_follows_perspective() {
        let s = EngineScore::Mate(2);
        assert_eq!(mate_in_for(s, Color::Black, Color::White), Some(-2));
        assert_eq!(mate_in_for(s, Color::Black, Color::Black), Some(2));
        assert_eq!(mate_in_for(EngineScore::Cp(10), Color::White, Color::White), None);
    }

    #[test]
    fn score_serializes_with_unit_tag() {
        let json = serde_json::to_string(&EngineScore::Cp(31)).unwrap();
        assert_eq!(json, r#"{"unit":"cp","value":31}"#);
        let json = serde_json::to_string(&EngineScore::Mate(-3)).unwrap();
        assert_eq!(json, r#"{"unit":"mate","value":-3}"#);
    }
}
