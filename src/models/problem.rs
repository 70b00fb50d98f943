//! Problem model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    difficulty_points, DEFAULT_MEMORY_LIMIT_MB, DEFAULT_TIME_LIMIT_MS, MAX_MEMORY_LIMIT_MB,
    MAX_TIME_LIMIT_MS,
};
use crate::utils::slug::slugify;

/// Problem difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Point value awarded for the first solve of a problem at this level
    pub fn points(&self) -> u32 {
        match self {
            Self::Easy => difficulty_points::EASY,
            Self::Medium => difficulty_points::MEDIUM,
            Self::Hard => difficulty_points::HARD,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// A single judgeable test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    /// None only for ad-hoc custom-input runs where no comparison is made
    pub output: Option<String>,
    pub is_hidden: bool,
}

impl TestCase {
    /// Visible sample case with an expected output
    pub fn sample(input: &str, output: &str) -> Self {
        Self {
            input: input.to_string(),
            output: Some(output.to_string()),
            is_hidden: false,
        }
    }

    /// Hidden case, judged identically but never exposed to submitters
    pub fn hidden(input: &str, output: &str) -> Self {
        Self {
            input: input.to_string(),
            output: Some(output.to_string()),
            is_hidden: true,
        }
    }

    /// Ad-hoc case from caller-supplied input, executed without comparison
    pub fn custom(input: &str) -> Self {
        Self {
            input: input.to_string(),
            output: None,
            is_hidden: false,
        }
    }
}

/// Aggregate submission statistics for a problem
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProblemStats {
    pub total_submissions: u64,
    pub accepted_submissions: u64,
}

/// Problem record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub problem_number: u32,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub time_limit_ms: u64,
    pub memory_limit_mb: u64,
    /// Fixed at creation from the difficulty; editing the difficulty later
    /// does not recompute it
    pub points: u32,
    pub sample_test_cases: Vec<TestCase>,
    #[serde(skip_serializing)]
    pub hidden_test_cases: Vec<TestCase>,
    pub is_active: bool,
    pub stats: ProblemStats,
}

impl Problem {
    /// Create a new problem with default limits; slug and points are derived
    pub fn new(title: &str, problem_number: u32, difficulty: Difficulty) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            slug: slugify(title),
            problem_number,
            difficulty,
            tags: Vec::new(),
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            memory_limit_mb: DEFAULT_MEMORY_LIMIT_MB,
            points: difficulty.points(),
            sample_test_cases: Vec::new(),
            hidden_test_cases: Vec::new(),
            is_active: true,
            stats: ProblemStats::default(),
        }
    }

    /// Set per-problem execution limits, clamped to the platform maxima
    /// so a misconfigured problem cannot tie up the execution backend
    pub fn with_limits(mut self, time_limit_ms: u64, memory_limit_mb: u64) -> Self {
        self.time_limit_ms = time_limit_ms.min(MAX_TIME_LIMIT_MS);
        self.memory_limit_mb = memory_limit_mb.min(MAX_MEMORY_LIMIT_MB);
        self
    }

    /// Full judging set: samples first, then hidden cases with the hidden
    /// flag forced on
    pub fn all_test_cases(&self) -> Vec<TestCase> {
        let mut cases = self.sample_test_cases.clone();
        cases.extend(self.hidden_test_cases.iter().map(|tc| TestCase {
            input: tc.input.clone(),
            output: tc.output.clone(),
            is_hidden: true,
        }));
        cases
    }

    /// Total number of judgeable test cases
    pub fn test_case_count(&self) -> usize {
        self.sample_test_cases.len() + self.hidden_test_cases.len()
    }
}
