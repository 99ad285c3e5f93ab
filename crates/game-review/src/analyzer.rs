//! Batch review pass: one engine, two searches per non-trivial move.

use std::sync::atomic::{AtomicBool, Ordering};

use engine_client::score::{mate_in_for, to_absolute};
use engine_client::{EngineConfig, EngineError, UciClient};
use shakmaty::Color;
use tokio::io::AsyncBufRead;
use tracing::{info, warn};

use crate::classify::{self, Classification, MoveContext};
use crate::openings;
use crate::record::{GameRecord, MoveRecord};
use crate::report::{self, ColorPair, GameReviewReport, MoveAnalysis};

/// Runs the review pass against a borrowed engine client.
pub struct GameAnalyzer<'a, R> {
    client: &'a mut UciClient<R>,
    depth: u8,
}

impl<'a, R: AsyncBufRead + Unpin> GameAnalyzer<'a, R> {
    pub fn new(client: &'a mut UciClient<R>, depth: u8) -> Self {
        GameAnalyzer { client, depth }
    }

    /// Review every move in order. `progress` is called after each analyzed
    /// move with (done, total). `abort` is polled before each engine search;
    /// once set, the remaining moves get placeholder entries and the report
    /// comes back degraded. An engine failure mid-pass degrades the same way
    /// instead of erroring out.
    pub async fn review(
        &mut self,
        record: &GameRecord,
        mut progress: impl FnMut(usize, usize),
        abort: &AtomicBool,
    ) -> GameReviewReport {
        let total = record.moves.len();
        let opening = opening_name(record);
        let mut moves: Vec<MoveAnalysis> = Vec::with_capacity(total);
        let mut degraded = false;
        let mut last_eval_white = 0;

        for rec in &record.moves {
            if abort.load(Ordering::Relaxed) {
                warn!(done = moves.len(), total, "review pass aborted");
                degraded = true;
                break;
            }
            match self.review_move(rec, abort, last_eval_white).await {
                Ok(Some(analysis)) => {
                    last_eval_white = analysis.eval_white;
                    moves.push(analysis);
                    progress(moves.len(), total);
                }
                Ok(None) => {
                    warn!(done = moves.len(), total, "review pass aborted mid-move");
                    degraded = true;
                    break;
                }
                Err(e) => {
                    warn!(error = %e, ply = rec.index, "engine failed mid-pass");
                    degraded = true;
                    break;
                }
            }
        }

        for rec in &record.moves[moves.len()..] {
            moves.push(placeholder_analysis(rec, last_eval_white));
        }

        let accuracy = if degraded {
            ColorPair::default()
        } else {
            report::accuracy(&moves)
        };
        info!(
            total,
            white_accuracy = accuracy.white,
            black_accuracy = accuracy.black,
            degraded,
            "review complete"
        );
        GameReviewReport {
            accuracy,
            estimated_rating: report::estimated_rating(accuracy),
            opening,
            moves,
            degraded,
        }
    }

    /// `Ok(None)` means the abort flag tripped between this move's two
    /// searches; the caller degrades the report just like a top-of-loop
    /// abort.
    async fn review_move(
        &mut self,
        rec: &MoveRecord,
        abort: &AtomicBool,
        last_eval_white: i32,
    ) -> Result<Option<MoveAnalysis>, EngineError> {
        let ctx = MoveContext {
            is_capture: rec.is_capture,
            is_check: rec.is_check,
            is_forced: rec.legal_count_before == 1,
        };

        // No alternatives to compare against; skip the engine entirely.
        if ctx.is_forced {
            return Ok(Some(MoveAnalysis {
                index: rec.index,
                side: rec.color.into(),
                san: rec.san.clone(),
                uci: rec.uci.clone(),
                eval_white: last_eval_white,
                mate_in: None,
                best_move: rec.uci.clone(),
                loss: 0,
                classification: Classification::Forced,
                explanation: classify::explanation(Classification::Forced, 0, ctx),
            }));
        }

        self.client.set_position(&rec.fen_before)?;
        let before = self.client.go(self.depth).await?;

        if !before.best_move.is_empty() && rec.uci == before.best_move {
            let verdict = classify::best_move_verdict(before.score);
            return Ok(Some(MoveAnalysis {
                index: rec.index,
                side: rec.color.into(),
                san: rec.san.clone(),
                uci: rec.uci.clone(),
                eval_white: to_absolute(before.score, rec.color, Color::White),
                mate_in: mate_in_for(before.score, rec.color, Color::White),
                best_move: before.best_move,
                loss: 0,
                classification: verdict.classification,
                explanation: classify::explanation(verdict.classification, 0, ctx),
            }));
        }

        if abort.load(Ordering::Relaxed) {
            return Ok(None);
        }

        self.client.set_position(&rec.fen_after)?;
        let after = self.client.go(self.depth).await?;
        let verdict = classify::judged_verdict(before.score, after.score);
        let opponent = rec.color.other();

        Ok(Some(MoveAnalysis {
            index: rec.index,
            side: rec.color.into(),
            san: rec.san.clone(),
            uci: rec.uci.clone(),
            eval_white: to_absolute(after.score, opponent, Color::White),
            mate_in: mate_in_for(after.score, opponent, Color::White),
            best_move: before.best_move,
            loss: verdict.loss,
            classification: verdict.classification,
            explanation: classify::explanation(verdict.classification, verdict.loss, ctx),
        }))
    }
}

fn opening_name(record: &GameRecord) -> String {
    openings::identify_opening(&record.san_line())
        .map(|op| op.name.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Neutral entry for a move the engine never saw.
fn placeholder_analysis(rec: &MoveRecord, last_eval_white: i32) -> MoveAnalysis {
    MoveAnalysis {
        index: rec.index,
        side: rec.color.into(),
        san: rec.san.clone(),
        uci: rec.uci.clone(),
        eval_white: last_eval_white,
        mate_in: None,
        best_move: String::new(),
        loss: 0,
        classification: Classification::Book,
        explanation: String::new(),
    }
}

impl GameReviewReport {
    /// Placeholder report when no engine could be started: every move is
    /// listed, nothing is judged.
    pub fn ungraded(record: &GameRecord) -> Self {
        let moves = record
            .moves
            .iter()
            .map(|rec| placeholder_analysis(rec, 0))
            .collect();
        let accuracy = ColorPair::default();
        GameReviewReport {
            accuracy,
            estimated_rating: report::estimated_rating(accuracy),
            opening: opening_name(record),
            moves,
            degraded: true,
        }
    }
}

/// Review a PGN string end to end with a dedicated engine. Engine trouble
/// never fails the call; it degrades the report instead.
pub async fn review_pgn(
    config: &EngineConfig,
    pgn: &str,
    progress: impl FnMut(usize, usize),
    abort: &AtomicBool,
) -> GameReviewReport {
    let record = match GameRecord::from_pgn(pgn) {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %e, "rejecting unreviewable input");
            return GameReviewReport::empty();
        }
    };
    match UciClient::spawn(config).await {
        Ok(mut client) => {
            let report = GameAnalyzer::new(&mut client, config.review_depth)
                .review(&record, progress, abort)
                .await;
            client.quit().await;
            report
        }
        Err(e) => {
            warn!(error = %e, "engine unavailable, returning ungraded report");
            GameReviewReport::ungraded(&record)
        }
    }
}
