//! Domain models

pub mod contest;
pub mod problem;
pub mod submission;
pub mod user;

pub use contest::{Contest, ContestProblem, ContestSolve, ContestStatus, Participant};
pub use problem::{Difficulty, Problem, ProblemStats, TestCase};
pub use submission::{JudgeOutcome, Submission, TestCaseResult, Verdict};
pub use user::{SolvedProblem, User, UserStats};
