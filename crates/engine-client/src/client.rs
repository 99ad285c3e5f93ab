//! Async UCI client over an engine process or any line-oriented peer.
//!
//! Commands go through an unbounded channel to a writer task that owns the
//! engine's input stream. That lets a [`StopHandle`], cloned off the same
//! channel, interrupt a search while `go()` is awaiting the result. The
//! one-search-at-a-time rule is enforced by `go()` taking `&mut self`.

use std::process::Stdio;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::protocol::{parse_line, EngineEvent};
use crate::score::EngineScore;

/// Result of one completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Best move in UCI notation; empty when the position is already decided.
    pub best_move: String,
    /// Final primary-line score, relative to the side to move.
    pub score: EngineScore,
}

/// Cancels an in-flight search from outside the `go()` await.
#[derive(Clone)]
pub struct StopHandle {
    tx: mpsc::UnboundedSender<String>,
}

impl StopHandle {
    /// Ask the engine to cut the current search short. The pending `go()`
    /// still resolves normally, with the scores reached so far. Harmless
    /// when no search is running.
    pub fn stop(&self) {
        let _ = self.tx.send("stop".to_string());
    }
}

/// Handle to one UCI engine.
pub struct UciClient<R> {
    reader: R,
    tx: mpsc::UnboundedSender<String>,
    child: Option<Child>,
    line: String,
}

impl UciClient<BufReader<ChildStdout>> {
    /// Spawn the engine binary and run the handshake.
    pub async fn spawn(config: &EngineConfig) -> Result<Self, EngineError> {
        let mut child = Command::new(&config.engine_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                EngineError::Unavailable(format!("failed to spawn {}: {e}", config.engine_path))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| EngineError::Unavailable("engine stdin not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::Unavailable("engine stdout not captured".to_string()))?;

        let mut client = UciClient {
            reader: BufReader::new(stdout),
            tx: spawn_writer(stdin),
            child: Some(child),
            line: String::new(),
        };
        client.handshake(config).await?;
        Ok(client)
    }
}

fn spawn_writer<W>(mut writer: W) -> mpsc::UnboundedSender<String>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    tokio::spawn(async move {
        while let Some(cmd) = rx.recv().await {
            debug!("engine < {}", cmd);
            if writer.write_all(cmd.as_bytes()).await.is_err() {
                break;
            }
            if writer.write_all(b"\n").await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });
    tx
}

impl<R: AsyncBufRead + Unpin> UciClient<R> {
    /// Wrap an already-connected UCI peer. The caller still needs to run
    /// [`handshake`](Self::handshake).
    pub fn from_io<W>(reader: R, writer: W) -> Self
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        UciClient {
            reader,
            tx: spawn_writer(writer),
            child: None,
            line: String::new(),
        }
    }

    /// Run the uci/isready exchange and apply our options.
    pub async fn handshake(&mut self, config: &EngineConfig) -> Result<(), EngineError> {
        self.send("uci")?;
        timeout(config.init_timeout, self.wait_for(&EngineEvent::UciOk))
            .await
            .map_err(|_| EngineError::InitTimeout)??;
        self.send("setoption name Threads value 1")?;
        self.send(&format!("setoption name Hash value {}", config.hash_mb))?;
        self.send("setoption name MultiPV value 1")?;
        self.send("isready")?;
        timeout(config.init_timeout, self.wait_for(&EngineEvent::ReadyOk))
            .await
            .map_err(|_| EngineError::InitTimeout)??;
        Ok(())
    }

    /// A handle that can interrupt this client's running search.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: self.tx.clone(),
        }
    }

    /// Point the engine at a position. The engine sends nothing back.
    pub fn set_position(&self, fen: &str) -> Result<(), EngineError> {
        self.send(&format!("position fen {fen}"))
    }

    /// Depth-limited search on the current position. Holding `&mut self`
    /// until `bestmove` arrives keeps a second search from starting
    /// underneath this one.
    pub async fn go(&mut self, depth: u8) -> Result<AnalysisResult, EngineError> {
        self.send(&format!("go depth {depth}"))?;
        let mut score = EngineScore::Cp(0);
        loop {
            match self.read_event().await? {
                Some(EngineEvent::Info(info)) => {
                    if info.is_primary() {
                        if let Some(s) = info.score {
                            score = s;
                        }
                    }
                }
                Some(EngineEvent::BestMove { best, .. }) => {
                    return Ok(AnalysisResult {
                        best_move: best,
                        score,
                    });
                }
                _ => {}
            }
        }
    }

    /// Shut the engine down. Requires `&mut self`, so no search can still
    /// be awaiting a reply.
    pub async fn quit(&mut self) {
        let _ = self.send("quit");
        if let Some(child) = self.child.as_mut() {
            let _ = child.wait().await;
        }
    }

    fn send(&self, cmd: &str) -> Result<(), EngineError> {
        self.tx
            .send(cmd.to_string())
            .map_err(|_| EngineError::CommandChannel)
    }

    async fn read_event(&mut self) -> Result<Option<EngineEvent>, EngineError> {
        self.line.clear();
        let n = self.reader.read_line(&mut self.line).await?;
        if n == 0 {
            return Err(EngineError::Closed);
        }
        let trimmed = self.line.trim_end();
        debug!("engine > {}", trimmed);
        Ok(parse_line(trimmed))
    }

    async fn wait_for(&mut self, expected: &EngineEvent) -> Result<(), EngineError> {
        loop {
            if let Some(event) = self.read_event().await? {
                if event == *expected {
                    return Ok(());
                }
            }
        }
    }
}

impl<R> Drop for UciClient<R> {
    fn drop(&mut self) {
        if let Some(child) = self.child.as_mut() {
            let _ = child.start_kill();
        }
    }
}
