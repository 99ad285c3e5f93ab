//! Line-oriented parsing of UCI engine output.

use crate::score::EngineScore;

/// One parsed line of engine output. Lines that carry nothing we need
/// (id, option, info strings) parse to `None` upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UciOk,
    ReadyOk,
    BestMove { best: String, ponder: Option<String> },
    Info(InfoLine),
}

/// The fields of an `info` line we care about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoLine {
    pub depth: Option<u32>,
    pub multipv: Option<u32>,
    pub score: Option<EngineScore>,
    pub pv: Vec<String>,
}

impl InfoLine {
    /// Whether this line updates the primary running score and line.
    /// Engines omit `multipv` entirely when only one line is requested.
    pub fn is_primary(&self) -> bool {
        self.multipv.map_or(true, |n| n == 1)
    }
}

/// Parse one line of engine output. Unknown or malformed lines yield `None`.
pub fn parse_line(line: &str) -> Option<EngineEvent> {
    let trimmed = line.trim();
    if trimmed == "uciok" {
        return Some(EngineEvent::UciOk);
    }
    if trimmed == "readyok" {
        return Some(EngineEvent::ReadyOk);
    }
    if let Some(rest) = trimmed.strip_prefix("bestmove ") {
        let mut parts = rest.split_whitespace();
        let best_raw = parts.next()?;
        // "(none)" means checkmate or stalemate; report it as no move
        let best = if best_raw == "(none)" {
            String::new()
        } else {
            best_raw.to_string()
        };
        let ponder = match (parts.next(), parts.next()) {
            (Some("ponder"), Some(p)) => Some(p.to_string()),
            _ => None,
        };
        return Some(EngineEvent::BestMove { best, ponder });
    }
    if trimmed.starts_with("info ") {
        return parse_info(trimmed).map(EngineEvent::Info);
    }
    None
}

fn parse_info(line: &str) -> Option<InfoLine> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let mut info = InfoLine::default();
    let mut i = 1;
    while i < parts.len() {
        match parts[i] {
            "depth" => {
                info.depth = parts.get(i + 1).and_then(|v| v.parse().ok());
                i += 2;
            }
            "multipv" => {
                info.multipv = parts.get(i + 1).and_then(|v| v.parse().ok());
                i += 2;
            }
            "score" => {
                let value = parts.get(i + 2).and_then(|v| v.parse::<i32>().ok());
                match (parts.get(i + 1).copied(), value) {
                    (Some("cp"), Some(v)) => info.score = Some(EngineScore::Cp(v)),
                    (Some("mate"), Some(v)) => info.score = Some(EngineScore::Mate(v)),
                    _ => {}
                }
                i += 3;
            }
            "pv" => {
                // pv is always last among the fields we read
                info.pv = parts[i + 1..].iter().map(|s| s.to_string()).collect();
                break;
            }
            _ => i += 1,
        }
    }
    if info.score.is_none() && info.pv.is_empty() {
        return None;
    }
    Some(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cp_info_line() {
        let event = parse_line("info depth 12 seldepth 18 multipv 1 score cp 31 nodes 50000 pv e2e4 e7e5");
        let Some(EngineEvent::Info(info)) = event else {
            panic!("expected info event");
        };
        assert_eq!(info.depth, Some(12));
        assert_eq!(info.multipv, Some(1));
        assert_eq!(info.score, Some(EngineScore::Cp(31)));
        assert_eq!(info.pv, vec!["e2e4", "e7e5"]);
        assert!(info.is_primary());
    }

    #[test]
    fn parses_mate_score() {
        let event = parse_line("info depth 20 score mate -3 pv g8f8");
        let Some(EngineEvent::Info(info)) = event else {
            panic!("expected info event");
        };
        assert_eq!(info.score, Some(EngineScore::Mate(-3)));
    }

    #[test]
    fn secondary_lines_are_not_primary() {
        let event = parse_line("info depth 12 multipv 2 score cp -8 pv d2d4");
        let Some(EngineEvent::Info(info)) = event else {
            panic!("expected info event");
        };
        assert!(!info.is_primary());
    }

    #[test]
    fn untagged_info_counts_as_primary() {
        let event = parse_line("info depth 8 score cp 15 pv g1f3");
        let Some(EngineEvent::Info(info)) = event else {
            panic!("expected info event");
        };
        assert!(info.is_primary());
    }

    #[test]
    fn parses_bestmove_with_ponder() {
        let event = parse_line("bestmove e2e4 ponder e7e5");
        assert_eq!(
            event,
            Some(EngineEvent::BestMove {
                best: "e2e4".to_string(),
                ponder: Some("e7e5".to_string()),
            })
        );
    }

    #[test]
    fn bestmove_none_becomes_empty() {
        let event = parse_line("bestmove (none)");
        assert_eq!(
            event,
            Some(EngineEvent::BestMove {
                best: String::new(),
                ponder: None,
            })
        );
    }

    #[test]
    fn ignores_unrelated_lines() {
        assert_eq!(parse_line("id name Stockfish 16"), None);
        assert_eq!(parse_line("option name Hash type spin default 16"), None);
        assert_eq!(parse_line("info string NNUE evaluation enabled"), None);
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("info depth x score cp notanumber"), None);
        // a token merely starting with "bestmove" is not a bestmove line
        assert_eq!(parse_line("bestmovexyz"), None);
    }
}
