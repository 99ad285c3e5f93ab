//! The sequence validation state machine.
//!
//! A session holds a scripted line of UCI moves alternating between the
//! solver and the opponent. User moves are matched against the script;
//! matched opponent replies are played back automatically after a short
//! delay, and wrong moves revert to the exact pre-move position.

use std::time::Duration;

use serde::Serialize;
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Position, Rank, Role, Square};
use tracing::{debug, info};

use crate::error::TrainerError;
use crate::store::ProgressStore;

/// Pause before the scripted opponent reply appears on the board.
const REPLY_DELAY: Duration = Duration::from_millis(600);
/// How long a wrong move stays visible before the board snaps back.
const REVERT_DELAY: Duration = Duration::from_millis(1000);

/// How a session reacts to wrong moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Revert and let the solver retry indefinitely.
    Practice,
    /// Wrong moves cost a strike; at the limit the session ends for good.
    Rush { strike_limit: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Solving,
    Succeeded,
    Failed,
    Ended,
}

/// What one user move did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveVerdict {
    /// Final scripted move matched; the sequence is complete.
    Solved,
    /// Correct move with an opponent reply still owed.
    Advanced,
    /// Wrong move; the board shows it until [`SequenceSession::recover`]
    /// reverts it (or, in rush mode at the limit, forever).
    Rejected,
}

pub struct SequenceSession {
    start_position: Chess,
    position: Chess,
    expected: Vec<String>,
    cursor: usize,
    status: SessionStatus,
    mode: SessionMode,
    strikes: u32,
    reply_pending: bool,
    /// Exact pre-move snapshot for mismatch recovery.
    snapshot: Option<Chess>,
    completion_key: String,
    completed: bool,
}

impl SequenceSession {
    pub fn new(
        start_fen: &str,
        expected: Vec<String>,
        mode: SessionMode,
        completion_key: impl Into<String>,
    ) -> Result<Self, TrainerError> {
        let fen: Fen = start_fen
            .parse()
            .map_err(|_| TrainerError::InvalidPosition(start_fen.to_string()))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|_| TrainerError::InvalidPosition(start_fen.to_string()))?;
        Ok(SequenceSession {
            start_position: position.clone(),
            position,
            expected,
            cursor: 0,
            status: SessionStatus::Solving,
            mode,
            strikes: 0,
            reply_pending: false,
            snapshot: None,
            completion_key: completion_key.into(),
            completed: false,
        })
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    pub fn side_to_move(&self) -> Color {
        self.position.turn()
    }

    /// Current board as a FEN string.
    pub fn fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    /// True when a scripted opponent reply is owed to the board.
    pub fn reply_pending(&self) -> bool {
        self.reply_pending
    }

    /// Apply the solver's move and match it against the script. The move
    /// must be legal on the board regardless of the script; promotions are
    /// inferred from the board (a pawn reaching the last rank), never
    /// trusted from the caller.
    pub fn play_user_move(
        &mut self,
        store: &mut dyn ProgressStore,
        from: &str,
        to: &str,
        promotion: Option<char>,
    ) -> Result<MoveVerdict, TrainerError> {
        if self.status != SessionStatus::Solving
            || self.reply_pending
            || self.cursor >= self.expected.len()
        {
            return Err(TrainerError::NotSolving);
        }

        let uci_str = self.user_uci(from, to, promotion)?;
        let uci: UciMove = uci_str
            .parse()
            .map_err(|_| TrainerError::IllegalMove(uci_str.clone()))?;
        let mv = uci
            .to_move(&self.position)
            .map_err(|_| TrainerError::IllegalMove(uci_str.clone()))?;

        let expected = &self.expected[self.cursor];
        // A 4-character script entry accepts any promotion piece.
        let matched =
            uci_str == *expected || (expected.len() == 4 && uci_str.starts_with(expected.as_str()));

        if !matched {
            debug!(played = %uci_str, expected = %expected, "sequence mismatch");
            // The wrong move stays on the board until recover() runs.
            self.snapshot = Some(self.position.clone());
            self.position.play_unchecked(mv);
            self.status = SessionStatus::Failed;
            if let SessionMode::Rush { strike_limit } = self.mode {
                self.strikes += 1;
                if self.strikes >= strike_limit {
                    info!(strikes = self.strikes, "strike limit reached, session over");
                    self.status = SessionStatus::Ended;
                }
            }
            return Ok(MoveVerdict::Rejected);
        }

        self.position.play_unchecked(mv);
        self.cursor += 1;

        if self.cursor >= self.expected.len() {
            self.status = SessionStatus::Succeeded;
            if !self.completed {
                self.completed = true;
                store.set(&self.completion_key, "true");
            }
            info!(key = %self.completion_key, "sequence solved");
            return Ok(MoveVerdict::Solved);
        }

        self.reply_pending = true;
        Ok(MoveVerdict::Advanced)
    }

    /// Play the scripted opponent reply after the standard delay. Returns
    /// the reply in UCI notation.
    pub async fn play_scheduled_reply(&mut self) -> Result<String, TrainerError> {
        if !self.reply_pending || self.status != SessionStatus::Solving {
            return Err(TrainerError::NotSolving);
        }
        tokio::time::sleep(REPLY_DELAY).await;

        let reply = self.expected[self.cursor].clone();
        let uci: UciMove = reply
            .parse()
            .map_err(|_| TrainerError::BadScript(reply.clone()))?;
        let mv = uci
            .to_move(&self.position)
            .map_err(|_| TrainerError::BadScript(reply.clone()))?;
        self.position.play_unchecked(mv);
        self.cursor += 1;
        self.reply_pending = false;
        Ok(reply)
    }

    /// After a rejected move: wait out the display delay, restore the exact
    /// pre-move position, and resume solving. Errors once a rush session
    /// has ended; the failed board stays.
    pub async fn recover(&mut self) -> Result<(), TrainerError> {
        if self.status != SessionStatus::Failed {
            return Err(TrainerError::NotSolving);
        }
        tokio::time::sleep(REVERT_DELAY).await;
        if let Some(snapshot) = self.snapshot.take() {
            self.position = snapshot;
        }
        self.status = SessionStatus::Solving;
        Ok(())
    }

    /// Start the same sequence over from the initial position. Strikes and
    /// the completion flag survive a reset.
    pub fn reset(&mut self) -> Result<(), TrainerError> {
        if self.status == SessionStatus::Ended {
            return Err(TrainerError::NotSolving);
        }
        self.position = self.start_position.clone();
        self.cursor = 0;
        self.status = SessionStatus::Solving;
        self.reply_pending = false;
        self.snapshot = None;
        Ok(())
    }

    fn user_uci(
        &self,
        from: &str,
        to: &str,
        promotion: Option<char>,
    ) -> Result<String, TrainerError> {
        let from_sq: Square = from
            .parse()
            .map_err(|_| TrainerError::IllegalMove(format!("{from}{to}")))?;
        let to_sq: Square = to
            .parse()
            .map_err(|_| TrainerError::IllegalMove(format!("{from}{to}")))?;
        let piece = self.position.board().piece_at(from_sq);
        let is_promotion = piece.is_some_and(|p| {
            p.role == Role::Pawn
                && ((p.color == Color::White && to_sq.rank() == Rank::Eighth)
                    || (p.color == Color::Black && to_sq.rank() == Rank::First))
        });
        let mut uci = format!("{from}{to}");
        if is_promotion {
            uci.push(promotion.unwrap_or('q'));
        }
        Ok(uci)
    }
}
