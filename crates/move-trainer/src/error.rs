//! Trainer error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("Invalid start position: {0}")]
    InvalidPosition(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Scripted move is not legal here: {0}")]
    BadScript(String),

    #[error("Session is not in a state that accepts this action")]
    NotSolving,
}
