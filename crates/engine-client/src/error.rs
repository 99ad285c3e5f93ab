//! Engine client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Engine unavailable: {0}")]
    Unavailable(String),

    #[error("Engine did not complete the handshake in time")]
    InitTimeout,

    #[error("Engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine closed its output stream")]
    Closed,

    #[error("Engine command channel is closed")]
    CommandChannel,
}
