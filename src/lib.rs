//! AlgoArena judging core
//!
//! The submission pipeline and contest scoring engine behind an online
//! judge. A submission enters through [`services::SubmissionService`],
//! lands on a bounded judge queue, and is picked up by a worker that runs
//! it against every test case through an [`execution::ExecutionBackend`],
//! aggregates a single verdict and finalizes the record exactly once.
//! Accepted verdicts flow on to [`services::ScoringService`] for points,
//! streaks and contest leaderboard credit.
//!
//! Layering, top down:
//!
//! - `services`: intake validation, the judging workflow, scoring
//! - `judge`: queue, worker pool and the concurrent test orchestrator
//! - `execution`: backend contract and the Judge0 HTTP client
//! - `db`: storage trait plus an in-memory implementation
//! - `models`: submissions, problems, users, contests

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod execution;
pub mod judge;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
