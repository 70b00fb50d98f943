//! Application configuration management
//!
//! This module handles loading and validating configuration from environment
//! variables. Configuration is loaded once at startup by the embedding
//! service and threaded through [`crate::state::AppState`].

use std::env;

use crate::constants::{
    DEFAULT_EXECUTION_BASE_URL, DEFAULT_EXECUTION_TIMEOUT_SECS, DEFAULT_MAX_POLL_ROUNDS,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT,
};

/// Main application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub execution: ExecutionConfig,
    pub judge: JudgeConfig,
}

/// Execution backend configuration
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Base URL of the external compile-and-run service
    pub base_url: String,
    /// Per-request HTTP timeout in seconds
    pub request_timeout_secs: u64,
}

/// Judging pipeline configuration
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Interval between polling rounds in milliseconds
    pub poll_interval_ms: u64,
    /// Maximum polling rounds before unresolved test cases are forced terminal
    pub max_poll_rounds: u32,
    /// Number of concurrent judging workers
    pub worker_count: usize,
    /// Capacity of the bounded judging queue
    pub queue_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            execution: ExecutionConfig::from_env()?,
            judge: JudgeConfig::from_env()?,
        })
    }
}

impl ExecutionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env::var("EXECUTION_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_EXECUTION_BASE_URL.to_string()),
            request_timeout_secs: env::var("EXECUTION_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_EXECUTION_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("EXECUTION_TIMEOUT_SECS".to_string()))?,
        })
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EXECUTION_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_EXECUTION_TIMEOUT_SECS,
        }
    }
}

impl JudgeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            poll_interval_ms: env::var("JUDGE_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_MS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JUDGE_POLL_INTERVAL_MS".to_string()))?,
            max_poll_rounds: env::var("JUDGE_MAX_POLL_ROUNDS")
                .unwrap_or_else(|_| DEFAULT_MAX_POLL_ROUNDS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JUDGE_MAX_POLL_ROUNDS".to_string()))?,
            worker_count: env::var("JUDGE_WORKER_COUNT")
                .unwrap_or_else(|_| DEFAULT_WORKER_COUNT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JUDGE_WORKER_COUNT".to_string()))?,
            queue_capacity: env::var("JUDGE_QUEUE_CAPACITY")
                .unwrap_or_else(|_| DEFAULT_QUEUE_CAPACITY.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JUDGE_QUEUE_CAPACITY".to_string()))?,
        })
    }
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_poll_rounds: DEFAULT_MAX_POLL_ROUNDS,
            worker_count: DEFAULT_WORKER_COUNT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Configuration loading errors. Every variable has a default, so the
/// only way loading fails is a present-but-unparseable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = Config::default();
        assert_eq!(config.execution.base_url, DEFAULT_EXECUTION_BASE_URL);
        assert_eq!(config.judge.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.judge.max_poll_rounds, DEFAULT_MAX_POLL_ROUNDS);
        assert_eq!(config.judge.worker_count, DEFAULT_WORKER_COUNT);
    }
}
