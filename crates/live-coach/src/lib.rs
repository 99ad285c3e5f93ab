//! Interactive per-turn coaching on top of the engine client: eval bar
//! numbers, move judgments, suggestion arrows and threat warnings.

pub mod coach;
pub mod feedback;

pub use coach::{null_move_fen, CoachCache, CoachState, LiveCoach, TurnReport};
pub use feedback::{Arrow, CoachSettings, MoveFeedback, PlayedMove};
