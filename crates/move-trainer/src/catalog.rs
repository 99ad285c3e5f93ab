//! Bundled puzzle and lesson content.

use shakmaty::Color;

use crate::error::TrainerError;
use crate::session::{SequenceSession, SessionMode};

#[derive(Debug, Clone, Copy)]
pub struct Puzzle {
    pub id: &'static str,
    pub fen: &'static str,
    /// Expected move sequence in UCI notation.
    pub moves: &'static [&'static str],
    pub rating: u32,
    pub theme: &'static str,
    /// Who is solving.
    pub color: Color,
}

pub const PUZZLES: &[Puzzle] = &[
    Puzzle {
        id: "001",
        fen: "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        moves: &["h5f7"],
        rating: 400,
        theme: "Mate in 1",
        color: Color::White,
    },
    Puzzle {
        id: "002",
        fen: "6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1",
        moves: &["e1e8"],
        rating: 600,
        theme: "Back Rank Mate",
        color: Color::White,
    },
    Puzzle {
        // Knight lands on f7; the g8 rook is pinned by the a2 bishop.
        id: "003",
        fen: "6rk/7p/7N/8/8/8/B7/7K w - - 0 1",
        moves: &["h6f7"],
        rating: 800,
        theme: "Smothered Mate",
        color: Color::White,
    },
    Puzzle {
        // 1. Qe8+ Rxe8 2. Rxe8#
        id: "004",
        fen: "r5k1/5ppp/8/8/4Q3/8/5PPP/4R1K1 w - - 0 1",
        moves: &["e4e8", "a8e8", "e1e8"],
        rating: 1000,
        theme: "Back Rank Sacrifice",
        color: Color::White,
    },
    Puzzle {
        id: "005",
        fen: "7k/R7/5N2/8/8/8/8/7K w - - 0 1",
        moves: &["a7h7"],
        rating: 900,
        theme: "Arabian Mate",
        color: Color::White,
    },
    Puzzle {
        id: "006",
        fen: "r5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1",
        moves: &["a8a1"],
        rating: 300,
        theme: "Back Rank Mate",
        color: Color::Black,
    },
];

#[derive(Debug, Clone, Copy)]
pub struct LessonChallenge {
    pub fen: &'static str,
    pub moves: &'static [&'static str],
    /// Shown before the challenge.
    pub instruction: &'static str,
    /// Shown after success.
    pub explanation: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Lesson {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub challenges: &'static [LessonChallenge],
}

pub const LESSONS: &[Lesson] = &[
    Lesson {
        id: "moving-pieces",
        title: "Moving the Pieces",
        category: "Beginner",
        description: "Learn how each chess piece moves.",
        challenges: &[
            LessonChallenge {
                fen: "8/8/8/3R4/8/8/8/4K2k w - - 0 1",
                moves: &["d5d8"],
                instruction: "The Rook moves in straight lines. Move the rook to the top rank.",
                explanation: "Great! Rooks can move as far as they want up, down, left, or right.",
            },
            LessonChallenge {
                fen: "8/8/8/4B3/8/8/8/4K2k w - - 0 1",
                moves: &["e5h8"],
                instruction: "The Bishop moves diagonally. Move the bishop to the corner (h8).",
                explanation: "Excellent! Bishops always stay on the same color square.",
            },
        ],
    },
    Lesson {
        id: "checkmate-patterns",
        title: "Checkmate Patterns",
        category: "Beginner",
        description: "Learn the most common checkmate patterns to win games.",
        challenges: &[
            LessonChallenge {
                fen: "6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1",
                moves: &["e1e8"],
                instruction: "Deliver a Back Rank Mate.",
                explanation: "Perfect! The king is trapped behind his own pawns.",
            },
            LessonChallenge {
                fen: "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
                moves: &["h5f7"],
                instruction: "Execute the Scholar's Mate.",
                explanation: "You got it! This is a classic trap in the opening.",
            },
        ],
    },
];

impl Puzzle {
    pub fn by_id(id: &str) -> Option<&'static Puzzle> {
        PUZZLES.iter().find(|p| p.id == id)
    }

    /// Progress key written when the puzzle is solved.
    pub fn completion_key(&self) -> String {
        format!("puzzle_solved_{}", self.id)
    }

    pub fn session(&self, mode: SessionMode) -> Result<SequenceSession, TrainerError> {
        SequenceSession::new(
            self.fen,
            self.moves.iter().map(|s| s.to_string()).collect(),
            mode,
            self.completion_key(),
        )
    }
}

impl Lesson {
    pub fn by_id(id: &str) -> Option<&'static Lesson> {
        LESSONS.iter().find(|l| l.id == id)
    }

    /// Progress key written when challenge `index` is solved.
    pub fn completion_key(&self, index: usize) -> String {
        format!("lesson_{}_challenge_{index}", self.id)
    }

    pub fn challenge_session(
        &self,
        index: usize,
        mode: SessionMode,
    ) -> Result<SequenceSession, TrainerError> {
        let challenge = self
            .challenges
            .get(index)
            .ok_or_else(|| TrainerError::InvalidPosition(format!("no challenge {index}")))?;
        SequenceSession::new(
            challenge.fen,
            challenge.moves.iter().map(|s| s.to_string()).collect(),
            mode,
            self.completion_key(index),
        )
    }
}
