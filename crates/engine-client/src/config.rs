//! Engine configuration from environment variables.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path to the UCI engine binary
    pub engine_path: String,
    /// Search depth for batch game review
    pub review_depth: u8,
    /// Search depth for the coach's turn-start pass
    pub coach_depth: u8,
    /// Search depth for judging a just-played move
    pub verdict_depth: u8,
    /// Search depth for the advisory threat scan
    pub threat_depth: u8,
    /// Deadline for the uci/isready handshake
    pub init_timeout: Duration,
    /// Hash table size handed to the engine, in MiB
    pub hash_mb: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            engine_path: "/usr/local/bin/stockfish".to_string(),
            review_depth: 12,
            coach_depth: 15,
            verdict_depth: 10,
            threat_depth: 10,
            init_timeout: Duration::from_secs(10),
            hash_mb: 256,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = EngineConfig::default();
        let config = EngineConfig {
            engine_path: env::var("ENGINE_PATH").unwrap_or(defaults.engine_path),
            review_depth: env_parse("REVIEW_DEPTH", defaults.review_depth),
            coach_depth: env_parse("COACH_DEPTH", defaults.coach_depth),
            verdict_depth: env_parse("VERDICT_DEPTH", defaults.verdict_depth),
            threat_depth: env_parse("THREAT_DEPTH", defaults.threat_depth),
            init_timeout: Duration::from_secs(env_parse(
                "ENGINE_INIT_TIMEOUT_SECS",
                defaults.init_timeout.as_secs(),
            )),
            hash_mb: env_parse("ENGINE_HASH_MB", defaults.hash_mb),
        };
        tracing::info!(
            engine_path = %config.engine_path,
            review_depth = config.review_depth,
            coach_depth = config.coach_depth,
            "engine config loaded"
        );
        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = EngineConfig::default();
        assert_eq!(config.review_depth, 12);
        assert_eq!(config.coach_depth, 15);
        assert_eq!(config.init_timeout, Duration::from_secs(10));
    }
}
