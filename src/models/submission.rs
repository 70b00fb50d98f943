//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verdict for a submission or a single test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Waiting to be judged
    Pending,
    /// Currently being judged
    Running,
    /// All test cases passed
    Accepted,
    /// Output does not match expected
    WrongAnswer,
    /// Exceeded time limit
    TimeLimitExceeded,
    /// Exceeded memory limit
    MemoryLimitExceeded,
    /// Program crashed or non-zero exit
    RuntimeError,
    /// Source failed to compile
    CompilationError,
    /// Ran without comparison (ad-hoc custom-input case only)
    Executed,
}

impl Verdict {
    /// Get verdict as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Accepted => "accepted",
            Self::WrongAnswer => "wrong_answer",
            Self::TimeLimitExceeded => "time_limit_exceeded",
            Self::MemoryLimitExceeded => "memory_limit_exceeded",
            Self::RuntimeError => "runtime_error",
            Self::CompilationError => "compilation_error",
            Self::Executed => "executed",
        }
    }

    /// Parse verdict from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "running" => Some(Self::Running),
            "accepted" => Some(Self::Accepted),
            "wrong_answer" => Some(Self::WrongAnswer),
            "time_limit_exceeded" => Some(Self::TimeLimitExceeded),
            "memory_limit_exceeded" => Some(Self::MemoryLimitExceeded),
            "runtime_error" => Some(Self::RuntimeError),
            "compilation_error" => Some(Self::CompilationError),
            "executed" => Some(Self::Executed),
            _ => None,
        }
    }

    /// Check if this is a terminal verdict (no further transition occurs)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }

    /// Check if this verdict means the solution was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Submission record: one attempt to solve a problem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub contest_id: Option<Uuid>,
    pub language: String,
    pub source_code: String,
    pub verdict: Verdict,
    /// Maximum runtime across test cases, in milliseconds
    pub runtime_ms: f64,
    /// Maximum memory across test cases, in kilobytes
    pub memory_kb: u64,
    pub test_results: Vec<TestCaseResult>,
    /// Compile error text, or workflow failure diagnostic
    pub compile_output: String,
    pub passed_test_cases: usize,
    pub total_test_cases: usize,
    /// Wall time reported by the submitter's own timer, in seconds
    pub time_taken_secs: u64,
    pub is_contest: bool,
    pub submitted_at: DateTime<Utc>,
    pub judged_at: Option<DateTime<Utc>>,
}

impl Submission {
    /// Create a new pending submission
    pub fn new(
        user_id: Uuid,
        problem_id: Uuid,
        contest_id: Option<Uuid>,
        language: &str,
        source_code: &str,
        time_taken_secs: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            problem_id,
            contest_id,
            language: language.to_string(),
            source_code: source_code.to_string(),
            verdict: Verdict::Pending,
            runtime_ms: 0.0,
            memory_kb: 0,
            test_results: Vec::new(),
            compile_output: String::new(),
            passed_test_cases: 0,
            total_test_cases: 0,
            time_taken_secs,
            is_contest: contest_id.is_some(),
            submitted_at: Utc::now(),
            judged_at: None,
        }
    }

    /// Copy of this submission with the source code stripped, for viewers
    /// who are neither the owner nor an admin
    pub fn redacted(&self) -> Self {
        let mut view = self.clone();
        view.source_code = String::new();
        view
    }
}

/// Outcome of one test case execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCaseResult {
    pub index: usize,
    pub input: String,
    /// None means no comparison was performed (ad-hoc custom-input run)
    pub expected_output: Option<String>,
    pub actual_output: String,
    pub verdict: Verdict,
    pub runtime_ms: f64,
    pub memory_kb: u64,
    /// Runtime stderr, or compile output for compilation failures
    pub stderr: String,
    pub is_hidden: bool,
}

/// Aggregated judging outcome, persisted as one atomic submission update
#[derive(Debug, Clone)]
pub struct JudgeOutcome {
    pub verdict: Verdict,
    pub test_results: Vec<TestCaseResult>,
    pub runtime_ms: f64,
    pub memory_kb: u64,
    pub passed_test_cases: usize,
    pub total_test_cases: usize,
    pub compile_output: String,
    pub judged_at: DateTime<Utc>,
}

impl JudgeOutcome {
    /// Build an outcome from per-test-case results and the aggregated verdict
    pub fn from_results(verdict: Verdict, results: Vec<TestCaseResult>) -> Self {
        let runtime_ms = results.iter().map(|r| r.runtime_ms).fold(0.0, f64::max);
        let memory_kb = results.iter().map(|r| r.memory_kb).max().unwrap_or(0);
        let passed = results
            .iter()
            .filter(|r| r.verdict == Verdict::Accepted)
            .count();
        let compile_output = results
            .iter()
            .find(|r| r.verdict == Verdict::CompilationError)
            .map(|r| r.stderr.clone())
            .unwrap_or_default();

        Self {
            verdict,
            runtime_ms,
            memory_kb,
            passed_test_cases: passed,
            total_test_cases: results.len(),
            compile_output,
            judged_at: Utc::now(),
            test_results: results,
        }
    }

    /// Terminal outcome for a judging workflow that failed unexpectedly.
    ///
    /// The diagnostic lands in `compile_output` so the submitter sees why
    /// the run could not complete; the submission never stays pending.
    pub fn workflow_failure(diagnostic: String) -> Self {
        Self {
            verdict: Verdict::RuntimeError,
            test_results: Vec::new(),
            runtime_ms: 0.0,
            memory_kb: 0,
            passed_test_cases: 0,
            total_test_cases: 0,
            compile_output: diagnostic,
            judged_at: Utc::now(),
        }
    }
}
