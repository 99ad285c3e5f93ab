//! Asynchronous client for UCI chess engines.
//!
//! Wraps an engine process (or any line-oriented UCI peer) behind an async
//! API: handshake, position setup, depth-limited search, cancellation.

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod score;

pub use client::{AnalysisResult, StopHandle, UciClient};
pub use config::EngineConfig;
pub use error::EngineError;
pub use score::EngineScore;
