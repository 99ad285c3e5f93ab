//! Game ingestion: PGN text or UCI move lists into immutable move records.

use std::ops::ControlFlow;

use pgn_reader::{RawTag, Reader, SanPlus, Visitor};
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Position};

use crate::error::ReviewError;

/// One played half-move with everything the review pass needs, captured
/// once at ingestion so the analyzer never replays the game.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    /// Ply index, starting at 0.
    pub index: usize,
    /// Who made the move.
    pub color: Color,
    pub uci: String,
    pub san: String,
    pub fen_before: String,
    pub fen_after: String,
    pub is_capture: bool,
    pub is_check: bool,
    /// Legal moves available before this move; 1 means it was forced.
    pub legal_count_before: usize,
}

/// A validated game ready for review.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub start_fen: String,
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    /// Parse the first game in a PGN string. Honors the FEN tag for games
    /// from a setup position.
    pub fn from_pgn(pgn: &str) -> Result<Self, ReviewError> {
        let mut reader = Reader::new(std::io::Cursor::new(pgn.as_bytes()));
        let mut builder = RecordBuilder;
        match reader.read_game(&mut builder) {
            Ok(Some(result)) => result,
            Ok(None) => Err(ReviewError::InvalidGameRecord("no game in input".to_string())),
            Err(e) => Err(ReviewError::InvalidGameRecord(e.to_string())),
        }
    }

    /// Build a record from a start FEN and a UCI move list.
    pub fn from_uci_moves(start_fen: &str, moves: &[String]) -> Result<Self, ReviewError> {
        let fen: Fen = start_fen
            .parse()
            .map_err(|_| ReviewError::InvalidGameRecord(format!("bad FEN: {start_fen}")))?;
        let pos: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|_| ReviewError::InvalidGameRecord(format!("illegal position: {start_fen}")))?;
        let mut state = RecordState::starting_at(pos);
        for token in moves {
            let uci: UciMove = token
                .parse()
                .map_err(|_| ReviewError::InvalidGameRecord(format!("bad UCI move: {token}")))?;
            let mv = uci
                .to_move(&state.pos)
                .map_err(|_| ReviewError::InvalidGameRecord(format!("illegal move: {token}")))?;
            state.push(mv);
        }
        Ok(GameRecord {
            start_fen: state.start_fen,
            moves: state.moves,
        })
    }

    /// The game's SAN moves as one space-joined line, for opening lookup.
    pub fn san_line(&self) -> String {
        self.moves
            .iter()
            .map(|m| m.san.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

struct RecordState {
    pos: Chess,
    start_fen: String,
    moves: Vec<MoveRecord>,
    valid: bool,
}

impl RecordState {
    fn starting_at(pos: Chess) -> Self {
        let start_fen = Fen::from_position(&pos, EnPassantMode::Legal).to_string();
        RecordState {
            pos,
            start_fen,
            moves: Vec::new(),
            valid: true,
        }
    }

    fn push(&mut self, mv: shakmaty::Move) {
        let fen_before = Fen::from_position(&self.pos, EnPassantMode::Legal).to_string();
        let legal_count_before = self.pos.legal_moves().len();
        let color = self.pos.turn();
        let san = San::from_move(&self.pos, mv.clone()).to_string();
        let uci = mv.to_uci(CastlingMode::Standard).to_string();
        let is_capture = mv.is_capture();
        self.pos.play_unchecked(mv);
        let is_check = self.pos.is_check();
        let fen_after = Fen::from_position(&self.pos, EnPassantMode::Legal).to_string();
        self.moves.push(MoveRecord {
            index: self.moves.len(),
            color,
            uci,
            san,
            fen_before,
            fen_after,
            is_capture,
            is_check,
            legal_count_before,
        });
    }
}

#[derive(Default)]
struct RecordTags {
    setup_fen: Option<String>,
}

struct RecordBuilder;

impl Visitor for RecordBuilder {
    type Tags = RecordTags;
    type Movetext = RecordState;
    type Output = Result<GameRecord, ReviewError>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(RecordTags::default())
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        if name == b"FEN" {
            tags.setup_fen = Some(value.decode_utf8_lossy().to_string());
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        let pos = match tags.setup_fen {
            Some(fen_str) => {
                let parsed = fen_str
                    .parse::<Fen>()
                    .ok()
                    .and_then(|f| f.into_position::<Chess>(CastlingMode::Standard).ok());
                match parsed {
                    Some(pos) => pos,
                    None => {
                        return ControlFlow::Break(Err(ReviewError::InvalidGameRecord(format!(
                            "bad FEN header: {fen_str}"
                        ))))
                    }
                }
            }
            None => Chess::default(),
        };
        ControlFlow::Continue(RecordState::starting_at(pos))
    }

    fn san(&mut self, state: &mut Self::Movetext, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        if !state.valid {
            return ControlFlow::Continue(());
        }
        match san_plus.san.to_move(&state.pos) {
            Ok(mv) => state.push(mv),
            Err(_) => state.valid = false,
        }
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, state: Self::Movetext) -> Self::Output {
        if state.valid {
            Ok(GameRecord {
                start_fen: state.start_fen,
                moves: state.moves,
            })
        } else {
            Err(ReviewError::InvalidGameRecord(
                "movetext contains an illegal move".to_string(),
            ))
        }
    }
}
