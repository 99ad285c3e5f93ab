//! Review error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Invalid game record: {0}")]
    InvalidGameRecord(String),
}
