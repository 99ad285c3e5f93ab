//! Scripted move-sequence training: puzzles and guided lessons.

pub mod catalog;
pub mod error;
pub mod session;
pub mod store;

pub use catalog::{Lesson, LessonChallenge, Puzzle, LESSONS, PUZZLES};
pub use error::TrainerError;
pub use session::{MoveVerdict, SequenceSession, SessionMode, SessionStatus};
pub use store::{MemoryStore, ProgressStore};
