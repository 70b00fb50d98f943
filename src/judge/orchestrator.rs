//! Concurrent test run orchestration
//!
//! Fans a submission out to the execution backend, one run per test case,
//! then polls all outstanding runs in rounds until they settle or the
//! round budget runs out. Anything still pending after the budget is
//! force-verdicted time_limit_exceeded so a submission can never wedge
//! in a non-terminal state because the backend went quiet.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::config::JudgeConfig;
use crate::constants::languages;
use crate::error::{AppError, AppResult};
use crate::execution::{
    BackendStatus, ExecutionBackend, ExecutionHandle, ExecutionReport, ExecutionRequest,
};
use crate::models::{TestCase, TestCaseResult, Verdict};

pub struct TestRunOrchestrator {
    backend: Arc<dyn ExecutionBackend>,
    poll_interval: Duration,
    max_poll_rounds: u32,
}

impl TestRunOrchestrator {
    pub fn new(backend: Arc<dyn ExecutionBackend>, config: &JudgeConfig) -> Self {
        Self {
            backend,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            max_poll_rounds: config.max_poll_rounds,
        }
    }

    /// Run `source_code` against every test case and return one result per
    /// case, in input order.
    pub async fn run_all(
        &self,
        source_code: &str,
        language: &str,
        cases: &[TestCase],
        time_limit_ms: u64,
        memory_limit_mb: u64,
    ) -> AppResult<Vec<TestCaseResult>> {
        let language_id = languages::backend_id(language)
            .ok_or_else(|| AppError::UnsupportedLanguage(language.to_string()))?;

        let submits = cases.iter().map(|case| {
            self.backend.submit(ExecutionRequest {
                source_code: source_code.to_string(),
                language_id,
                stdin: case.input.clone(),
                time_limit_ms,
                memory_limit_mb,
            })
        });

        let mut results: Vec<Option<TestCaseResult>> = vec![None; cases.len()];
        let mut outstanding: Vec<(usize, ExecutionHandle)> = Vec::with_capacity(cases.len());

        for (index, submitted) in join_all(submits).await.into_iter().enumerate() {
            match submitted {
                Ok(handle) => outstanding.push((index, handle)),
                Err(err) => {
                    tracing::warn!(case = index, error = %err, "test case submission failed");
                    results[index] = Some(Self::forced_timeout(index, &cases[index]));
                }
            }
        }

        let mut rounds = 0;
        while !outstanding.is_empty() && rounds < self.max_poll_rounds {
            rounds += 1;
            tokio::time::sleep(self.poll_interval).await;

            let polls = outstanding
                .iter()
                .map(|(_, handle)| self.backend.poll(handle));
            let reports = join_all(polls).await;

            let mut still_pending = Vec::with_capacity(outstanding.len());
            for ((index, handle), report) in outstanding.into_iter().zip(reports) {
                match report {
                    Ok(report) if report.status.is_settled() => {
                        results[index] = Some(Self::settle(index, &cases[index], report));
                    }
                    Ok(_) => still_pending.push((index, handle)),
                    Err(err) => {
                        tracing::warn!(case = index, error = %err, "poll failed, will retry");
                        still_pending.push((index, handle));
                    }
                }
            }
            outstanding = still_pending;
        }

        for (index, _) in outstanding {
            tracing::warn!(case = index, "test case never settled, forcing timeout verdict");
            results[index] = Some(Self::forced_timeout(index, &cases[index]));
        }

        Ok(results
            .into_iter()
            .enumerate()
            .map(|(index, result)| result.unwrap_or_else(|| Self::forced_timeout(index, &cases[index])))
            .collect())
    }

    fn settle(index: usize, case: &TestCase, report: ExecutionReport) -> TestCaseResult {
        let actual_output = report.stdout.trim().to_string();
        let stderr = if report.stderr.is_empty() {
            report.compile_output.clone()
        } else {
            report.stderr.clone()
        };

        let verdict = match report.status {
            BackendStatus::Finished => match &case.output {
                Some(expected) if outputs_match(&report.stdout, expected) => Verdict::Accepted,
                Some(_) => Verdict::WrongAnswer,
                None => Verdict::Executed,
            },
            other => other.failure_verdict().unwrap_or(Verdict::RuntimeError),
        };

        TestCaseResult {
            index,
            input: case.input.clone(),
            expected_output: case.output.clone(),
            actual_output,
            verdict,
            runtime_ms: report.time_ms,
            memory_kb: report.memory_kb,
            stderr,
            is_hidden: case.is_hidden,
        }
    }

    fn forced_timeout(index: usize, case: &TestCase) -> TestCaseResult {
        TestCaseResult {
            index,
            input: case.input.clone(),
            expected_output: case.output.clone(),
            actual_output: String::new(),
            verdict: Verdict::TimeLimitExceeded,
            runtime_ms: 0.0,
            memory_kb: 0,
            stderr: "Execution timed out or judge unavailable.".to_string(),
            is_hidden: case.is_hidden,
        }
    }
}

/// Outputs are compared after stripping surrounding whitespace from both
/// sides, so a trailing newline or incidental leading blank never flips
/// a verdict.
pub(crate) fn outputs_match(actual: &str, expected: &str) -> bool {
    actual.trim() == expected.trim()
}
