//! Judging pipeline
//!
//! - [`orchestrator`]: drives the execution backend for every test case of
//!   one submission, concurrently, with bounded polling
//! - [`aggregate`]: collapses per-test-case verdicts into one submission
//!   verdict under a fixed precedence
//! - [`worker`]: bounded queue handoff and the judging worker pool

pub mod aggregate;
pub mod orchestrator;
pub mod worker;

pub use aggregate::aggregate_verdict;
pub use orchestrator::TestRunOrchestrator;
pub use worker::{spawn_workers, JudgeQueue};
