//! Scripted UCI engine speaking over an in-memory duplex pipe.
#![allow(dead_code)]

use std::collections::HashMap;

use engine_client::{EngineConfig, UciClient};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf};

/// Canned search output for one position.
#[derive(Debug, Clone)]
pub struct StubEval {
    pub info_lines: Vec<String>,
    pub best_move: String,
    /// Hold the bestmove back until a `stop` arrives.
    pub wait_for_stop: bool,
}

impl StubEval {
    pub fn cp(best_move: &str, cp: i32) -> Self {
        StubEval {
            info_lines: vec![format!(
                "info depth 12 multipv 1 score cp {cp} pv {best_move}"
            )],
            best_move: best_move.to_string(),
            wait_for_stop: false,
        }
    }

    pub fn mate(best_move: &str, mate: i32) -> Self {
        StubEval {
            info_lines: vec![format!(
                "info depth 12 multipv 1 score mate {mate} pv {best_move}"
            )],
            best_move: best_move.to_string(),
            wait_for_stop: false,
        }
    }

    pub fn hanging(best_move: &str, cp: i32) -> Self {
        StubEval {
            wait_for_stop: true,
            ..StubEval::cp(best_move, cp)
        }
    }

    pub fn with_info(mut self, line: &str) -> Self {
        self.info_lines.push(line.to_string());
        self
    }
}

pub type StubClient = UciClient<BufReader<ReadHalf<DuplexStream>>>;

/// Start a stub engine keyed by FEN and return a handshaken client.
/// Positions not in the map get a neutral answer.
pub async fn stub_client(evals: HashMap<String, StubEval>) -> StubClient {
    let (client_io, server_io) = io::duplex(64 * 1024);
    let (client_read, client_write) = io::split(client_io);
    tokio::spawn(run_stub(server_io, evals));
    let mut client = UciClient::from_io(BufReader::new(client_read), client_write);
    client
        .handshake(&EngineConfig::default())
        .await
        .expect("stub handshake");
    client
}

pub fn eval_map(entries: Vec<(String, StubEval)>) -> HashMap<String, StubEval> {
    entries.into_iter().collect()
}

async fn run_stub(stream: DuplexStream, evals: HashMap<String, StubEval>) {
    let (read, mut write) = io::split(stream);
    let mut lines = BufReader::new(read).lines();
    let mut current_fen = String::new();
    let mut held_back: Option<StubEval> = None;

    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim().to_string();
        if line == "uci" {
            let _ = write.write_all(b"id name StubFish\nuciok\n").await;
        } else if line == "isready" {
            let _ = write.write_all(b"readyok\n").await;
        } else if let Some(fen) = line.strip_prefix("position fen ") {
            current_fen = fen.to_string();
        } else if line.starts_with("go") {
            let eval = evals
                .get(&current_fen)
                .cloned()
                .unwrap_or_else(|| StubEval::cp("e2e4", 0));
            if eval.wait_for_stop {
                held_back = Some(eval);
            } else {
                let _ = write.write_all(render(&eval).as_bytes()).await;
            }
        } else if line == "stop" {
            if let Some(eval) = held_back.take() {
                let _ = write.write_all(render(&eval).as_bytes()).await;
            }
        } else if line == "quit" {
            break;
        }
        // setoption needs no acknowledgment
    }
}

fn render(eval: &StubEval) -> String {
    let mut out = String::new();
    for info in &eval.info_lines {
        out.push_str(info);
        out.push('\n');
    }
    out.push_str(&format!("bestmove {}\n", eval.best_move));
    out
}
