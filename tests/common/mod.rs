//! Shared fixtures for the integration suite: a scripted execution
//! backend and seed data for a small problem set.
//!
//! Each integration binary compiles this module independently and uses a
//! different subset of it.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use algoarena::config::{Config, ExecutionConfig, JudgeConfig};
use algoarena::db::MemoryStore;
use algoarena::error::{AppError, AppResult};
use algoarena::execution::{
    BackendStatus, ExecutionBackend, ExecutionHandle, ExecutionReport, ExecutionRequest,
};
use algoarena::judge::spawn_workers;
use algoarena::models::{Difficulty, Problem, TestCase, User};
use algoarena::AppState;

/// What the fake backend does with every run it receives.
#[derive(Clone)]
pub enum Script {
    /// Look the stdin up in the answer table and print the mapped output;
    /// unknown inputs print an empty line.
    Answers(HashMap<String, String>),
    /// Print the same output regardless of input.
    FixedOutput(String),
    /// Settle every run with the given failure status.
    Fail(BackendStatus),
    /// Report in_queue forever; runs never settle.
    NeverSettle,
    /// Refuse submissions outright.
    RejectSubmit,
}

struct Run {
    stdin: String,
    polls_left: u32,
}

/// Scripted [`ExecutionBackend`] standing in for the remote sandbox.
/// Each run stays in_queue for `pending_polls` rounds before settling.
pub struct FakeBackend {
    script: Script,
    pending_polls: u32,
    runs: Mutex<HashMap<String, Run>>,
}

impl FakeBackend {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            pending_polls: 1,
            runs: Mutex::new(HashMap::new()),
        }
    }

    fn report_for(&self, stdin: &str) -> ExecutionReport {
        let finished = |stdout: String| ExecutionReport {
            status: BackendStatus::Finished,
            stdout,
            stderr: String::new(),
            compile_output: String::new(),
            time_ms: 42.0,
            memory_kb: 2048,
        };

        match &self.script {
            Script::Answers(table) => {
                finished(table.get(stdin).cloned().unwrap_or_default() + "\n")
            }
            Script::FixedOutput(out) => finished(out.clone()),
            Script::Fail(status) => ExecutionReport {
                status: *status,
                stdout: String::new(),
                stderr: "exit status 1".to_string(),
                compile_output: if *status == BackendStatus::CompilationError {
                    "error: expected ';'".to_string()
                } else {
                    String::new()
                },
                time_ms: 0.0,
                memory_kb: 0,
            },
            Script::NeverSettle | Script::RejectSubmit => ExecutionReport {
                status: BackendStatus::InQueue,
                stdout: String::new(),
                stderr: String::new(),
                compile_output: String::new(),
                time_ms: 0.0,
                memory_kb: 0,
            },
        }
    }
}

#[async_trait]
impl ExecutionBackend for FakeBackend {
    async fn submit(&self, request: ExecutionRequest) -> AppResult<ExecutionHandle> {
        if matches!(self.script, Script::RejectSubmit) {
            return Err(AppError::Backend("sandbox unavailable".to_string()));
        }
        let token = Uuid::new_v4().to_string();
        self.runs.lock().await.insert(
            token.clone(),
            Run {
                stdin: request.stdin,
                polls_left: self.pending_polls,
            },
        );
        Ok(ExecutionHandle(token))
    }

    async fn poll(&self, handle: &ExecutionHandle) -> AppResult<ExecutionReport> {
        let mut runs = self.runs.lock().await;
        let run = runs
            .get_mut(&handle.0)
            .ok_or_else(|| AppError::Backend(format!("unknown token {}", handle.0)))?;

        if matches!(self.script, Script::NeverSettle) || run.polls_left > 0 {
            run.polls_left = run.polls_left.saturating_sub(1);
            return Ok(ExecutionReport {
                status: BackendStatus::InQueue,
                stdout: String::new(),
                stderr: String::new(),
                compile_output: String::new(),
                time_ms: 0.0,
                memory_kb: 0,
            });
        }

        let stdin = run.stdin.clone();
        Ok(self.report_for(&stdin))
    }
}

/// Config tuned for tests: millisecond polling, a handful of rounds.
pub fn fast_config() -> Config {
    Config {
        execution: ExecutionConfig {
            base_url: "http://localhost:0".to_string(),
            request_timeout_secs: 1,
        },
        judge: JudgeConfig {
            poll_interval_ms: 1,
            max_poll_rounds: 5,
            worker_count: 2,
            queue_capacity: 16,
        },
    }
}

/// Build state over a fresh [`MemoryStore`] and start the worker pool.
pub fn harness(backend: FakeBackend) -> (AppState, Arc<MemoryStore>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();

    let store = Arc::new(MemoryStore::new());
    let config = fast_config();
    let worker_count = config.judge.worker_count;
    let (state, receiver) = AppState::new(store.clone(), Arc::new(backend), config);
    spawn_workers(state.clone(), receiver, worker_count);
    (state, store)
}

/// The classic Two Sum problem with two visible samples and one hidden case.
pub fn two_sum_problem() -> Problem {
    let mut problem = Problem::new("Two Sum", 1, Difficulty::Easy).with_limits(1000, 128);
    problem.sample_test_cases = vec![
        TestCase::sample("2 7 11 15\n9", "0 1"),
        TestCase::sample("3 2 4\n6", "1 2"),
    ];
    problem.hidden_test_cases = vec![TestCase::hidden("3 3\n6", "0 1")];
    problem
}

/// Answer table a correct Two Sum solution would produce.
pub fn two_sum_answers() -> HashMap<String, String> {
    HashMap::from([
        ("2 7 11 15\n9".to_string(), "0 1".to_string()),
        ("3 2 4\n6".to_string(), "1 2".to_string()),
        ("3 3\n6".to_string(), "0 1".to_string()),
    ])
}

pub async fn seed_user(store: &MemoryStore, username: &str) -> User {
    let user = User::new(username);
    store.insert_user(user.clone()).await;
    user
}
