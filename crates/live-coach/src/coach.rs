//! The coach itself: pre-analyzes each position as it appears, caches the
//! result, and judges the player's move against it.

use engine_client::score::{mate_in_for, to_absolute};
use engine_client::{EngineConfig, EngineError, EngineScore, StopHandle, UciClient};
use game_review::classify::{self, MoveContext};
use serde::Serialize;
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, Position};
use tokio::io::{AsyncBufRead, BufReader};
use tokio::process::ChildStdout;
use tracing::debug;

use crate::feedback::{
    arrow_color, Arrow, CoachSettings, MoveFeedback, PlayedMove, COLOR_ALERT, COLOR_BEST,
};

/// Pre-move analysis slot. Valid only for the exact FEN it was computed on.
#[derive(Debug, Clone)]
pub struct CoachCache {
    pub fen: String,
    pub best_move: String,
    pub score: EngineScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachState {
    Idle,
    Analyzing,
    Ready,
}

/// Turn-start summary for the eval bar and threat display.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    pub fen: String,
    /// Evaluation in centipawns from White's perspective.
    pub eval_white: i32,
    /// Mate distance from White's perspective, when one exists.
    pub mate_in: Option<i32>,
    pub best_move: String,
    /// What the opponent would play if the mover passed.
    pub threat: Option<Arrow>,
}

pub struct LiveCoach<R> {
    client: UciClient<R>,
    config: EngineConfig,
    settings: CoachSettings,
    cache: Option<CoachCache>,
    state: CoachState,
}

impl LiveCoach<BufReader<ChildStdout>> {
    /// Spawn a dedicated engine for coaching. Callers should treat failure
    /// as "coaching off", not as fatal.
    pub async fn connect(config: &EngineConfig, settings: CoachSettings) -> Result<Self, EngineError> {
        let client = UciClient::spawn(config).await?;
        Ok(LiveCoach::new(client, config.clone(), settings))
    }
}

impl<R: AsyncBufRead + Unpin> LiveCoach<R> {
    pub fn new(client: UciClient<R>, config: EngineConfig, settings: CoachSettings) -> Self {
        LiveCoach {
            client,
            config,
            settings,
            cache: None,
            state: CoachState::Idle,
        }
    }

    pub fn state(&self) -> CoachState {
        self.state
    }

    pub fn cache(&self) -> Option<&CoachCache> {
        self.cache.as_ref()
    }

    /// A handle that interrupts whatever the coach is currently searching,
    /// for when the position changes under it.
    pub fn stop_handle(&self) -> StopHandle {
        self.client.stop_handle()
    }

    /// Analyze a fresh position: updates the eval bar and fills the cache
    /// so the next played move can be judged without re-searching.
    pub async fn on_turn_start(&mut self, fen: &str) -> Result<TurnReport, EngineError> {
        self.state = CoachState::Analyzing;
        let side = side_to_move(fen);

        self.client.set_position(fen)?;
        let result = self.client.go(self.config.coach_depth).await?;
        self.cache = Some(CoachCache {
            fen: fen.to_string(),
            best_move: result.best_move.clone(),
            score: result.score,
        });

        let eval_white = to_absolute(result.score, side, Color::White);
        let mate_in = mate_in_for(result.score, side, Color::White);

        let threat = if self.settings.threat_arrows {
            self.threat_scan(fen).await?
        } else {
            None
        };

        self.state = CoachState::Ready;
        Ok(TurnReport {
            fen: fen.to_string(),
            eval_white,
            mate_in,
            best_move: result.best_move,
            threat,
        })
    }

    /// Judge the move just played. A cache miss is not an error; the
    /// pre-move analysis is recomputed at the cheaper verdict depth.
    pub async fn evaluate_move(
        &mut self,
        fen_before: &str,
        played: &PlayedMove,
        fen_after: &str,
    ) -> Result<MoveFeedback, EngineError> {
        self.state = CoachState::Analyzing;
        let cached = match self.cache.take() {
            Some(c) if c.fen == fen_before => c,
            stale => {
                if stale.is_some() {
                    debug!(fen = fen_before, "coach cache stale, recomputing");
                }
                self.client.set_position(fen_before)?;
                let result = self.client.go(self.config.verdict_depth).await?;
                CoachCache {
                    fen: fen_before.to_string(),
                    best_move: result.best_move.clone(),
                    score: result.score,
                }
            }
        };

        let played_uci = played.uci();
        let ctx = move_context(fen_before, &played_uci);
        let mut arrows = Vec::new();

        let verdict = if !cached.best_move.is_empty() && played_uci == cached.best_move {
            classify::best_move_verdict(cached.score)
        } else {
            self.client.set_position(fen_after)?;
            let after = self.client.go(self.config.verdict_depth).await?;
            classify::judged_verdict(cached.score, after.score)
        };

        if self.settings.suggestion_arrows {
            arrows.extend(Arrow::from_uci(&played_uci, arrow_color(verdict.classification)));
            if played_uci != cached.best_move {
                arrows.extend(Arrow::from_uci(&cached.best_move, COLOR_BEST));
            }
        }

        let (message, reason) = if self.settings.feedback_text {
            (
                verdict.classification.label().to_string(),
                classify::explanation(verdict.classification, verdict.loss, ctx),
            )
        } else {
            (String::new(), String::new())
        };

        self.state = CoachState::Ready;
        Ok(MoveFeedback {
            classification: verdict.classification,
            message,
            reason,
            loss: verdict.loss,
            best_move: cached.best_move,
            arrows,
        })
    }

    /// Shut the coaching engine down.
    pub async fn quit(&mut self) {
        self.client.quit().await;
    }

    /// Short search on the position with the move handed to the opponent.
    /// Advisory only: a null-move position can be illegal (mover in check),
    /// in which case there is no threat to show.
    async fn threat_scan(&mut self, fen: &str) -> Result<Option<Arrow>, EngineError> {
        let flipped = null_move_fen(fen);
        if !position_is_valid(&flipped) {
            return Ok(None);
        }
        self.client.set_position(&flipped)?;
        let result = self.client.go(self.config.threat_depth).await?;
        Ok(Arrow::from_uci(&result.best_move, COLOR_ALERT))
    }
}

/// Flip the side to move and clear the en passant square, leaving the rest
/// of the FEN intact.
pub fn null_move_fen(fen: &str) -> String {
    let mut parts: Vec<String> = fen.split_whitespace().map(|s| s.to_string()).collect();
    if parts.len() >= 4 {
        parts[1] = if parts[1] == "w" { "b".to_string() } else { "w".to_string() };
        parts[3] = "-".to_string();
    }
    parts.join(" ")
}

fn side_to_move(fen: &str) -> Color {
    match fen.split_whitespace().nth(1) {
        Some("b") => Color::Black,
        _ => Color::White,
    }
}

fn position_is_valid(fen: &str) -> bool {
    fen.parse::<Fen>()
        .ok()
        .and_then(|f| f.into_position::<Chess>(CastlingMode::Standard).ok())
        .is_some()
}

/// Reconstruct capture/check/forced flags from the position. Falls back to
/// an empty context when the inputs do not line up.
fn move_context(fen_before: &str, played_uci: &str) -> MoveContext {
    let Some(pos) = fen_before
        .parse::<Fen>()
        .ok()
        .and_then(|f| f.into_position::<Chess>(CastlingMode::Standard).ok())
    else {
        return MoveContext::default();
    };
    let Some(mv) = played_uci
        .parse::<UciMove>()
        .ok()
        .and_then(|u| u.to_move(&pos).ok())
    else {
        return MoveContext::default();
    };
    let is_forced = pos.legal_moves().len() == 1;
    let is_capture = mv.is_capture();
    let mut after = pos;
    after.play_unchecked(mv);
    MoveContext {
        is_capture,
        is_check: after.is_check(),
        is_forced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_move_flips_the_mover_and_clears_en_passant() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        assert_eq!(
            null_move_fen(fen),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1"
        );
        let back = null_move_fen(&null_move_fen(fen));
        assert!(back.contains(" b "));
    }

    #[test]
    fn context_sees_captures_and_checks() {
        // Scholar's mate one move early: Qxf7 is a capture and a check
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
        let ctx = move_context(fen, "h5f7");
        assert!(ctx.is_capture);
        assert!(ctx.is_check);
        assert!(!ctx.is_forced);
    }

    #[test]
    fn bad_inputs_fall_back_to_the_default_context() {
        let ctx = move_context("not a fen", "e2e4");
        assert!(!ctx.is_capture && !ctx.is_check && !ctx.is_forced);
    }
}
