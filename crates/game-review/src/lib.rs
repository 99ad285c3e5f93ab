//! Whole-game review: engine-backed move classification, accuracy, and
//! rating estimates.

pub mod analyzer;
pub mod classify;
pub mod error;
pub mod openings;
pub mod record;
pub mod report;

pub use analyzer::{review_pgn, GameAnalyzer};
pub use classify::Classification;
pub use error::ReviewError;
pub use record::{GameRecord, MoveRecord};
pub use report::{ColorPair, GameReviewReport, MoveAnalysis, Side};
