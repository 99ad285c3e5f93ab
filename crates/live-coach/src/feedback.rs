//! Feedback payloads handed to the board UI.

use game_review::Classification;
use serde::{Deserialize, Serialize};

/// Arrow colors, matched to the board theme.
pub const COLOR_BEST: &str = "#81b64c";
pub const COLOR_STRONG: &str = "#96bc4b";
pub const COLOR_INACCURACY: &str = "#f7c045";
pub const COLOR_MISTAKE: &str = "#ffa459";
pub const COLOR_ALERT: &str = "#fa412d";

/// A colored arrow between two squares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrow {
    pub from: String,
    pub to: String,
    pub color: String,
}

impl Arrow {
    /// Build from the first four characters of a UCI move.
    pub fn from_uci(uci: &str, color: &str) -> Option<Arrow> {
        if uci.len() < 4 || !uci.is_ascii() {
            return None;
        }
        Some(Arrow {
            from: uci[0..2].to_string(),
            to: uci[2..4].to_string(),
            color: color.to_string(),
        })
    }
}

/// Arrow color for a judged move.
pub fn arrow_color(classification: Classification) -> &'static str {
    match classification {
        Classification::Best | Classification::Great => COLOR_BEST,
        Classification::Excellent
        | Classification::Good
        | Classification::Book
        | Classification::Forced => COLOR_STRONG,
        Classification::Inaccuracy => COLOR_INACCURACY,
        Classification::Mistake => COLOR_MISTAKE,
        Classification::Blunder | Classification::MissedWin => COLOR_ALERT,
    }
}

/// What the coach is allowed to show.
#[derive(Debug, Clone, Copy)]
pub struct CoachSettings {
    pub suggestion_arrows: bool,
    pub threat_arrows: bool,
    pub feedback_text: bool,
}

impl Default for CoachSettings {
    fn default() -> Self {
        CoachSettings {
            suggestion_arrows: true,
            threat_arrows: true,
            feedback_text: true,
        }
    }
}

/// The move a player just made, as board squares.
#[derive(Debug, Clone)]
pub struct PlayedMove {
    pub from: String,
    pub to: String,
    pub promotion: Option<char>,
}

impl PlayedMove {
    pub fn uci(&self) -> String {
        match self.promotion {
            Some(p) => format!("{}{}{}", self.from, self.to, p),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

/// Judgment of one played move, ready to display.
#[derive(Debug, Clone, Serialize)]
pub struct MoveFeedback {
    pub classification: Classification,
    /// Display label; empty when feedback text is disabled.
    pub message: String,
    /// One-line explanation; empty when feedback text is disabled.
    pub reason: String,
    pub loss: i32,
    pub best_move: String,
    pub arrows: Vec<Arrow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_splits_the_uci_squares() {
        let arrow = Arrow::from_uci("e2e4", COLOR_BEST).unwrap();
        assert_eq!(arrow.from, "e2");
        assert_eq!(arrow.to, "e4");
        // promotion suffix is ignored
        let arrow = Arrow::from_uci("e7e8q", COLOR_ALERT).unwrap();
        assert_eq!(arrow.to, "e8");
        assert!(Arrow::from_uci("", COLOR_BEST).is_none());
    }

    #[test]
    fn colors_track_severity() {
        assert_eq!(arrow_color(Classification::Best), COLOR_BEST);
        assert_eq!(arrow_color(Classification::Blunder), COLOR_ALERT);
        assert_eq!(arrow_color(Classification::Inaccuracy), COLOR_INACCURACY);
    }
}
