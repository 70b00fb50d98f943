//! Judge storage contract

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Contest, Difficulty, JudgeOutcome, Problem, SolvedProblem, Submission, User};

/// Narrow storage contract for the judging pipeline.
///
/// Counter updates and membership-gated writes are single atomic operations
/// on the implementation side; callers never read a document, mutate it in
/// memory and write it back.
#[async_trait]
pub trait JudgeStore: Send + Sync {
    // -- submissions ---------------------------------------------------------

    async fn insert_submission(&self, submission: Submission) -> AppResult<()>;

    async fn get_submission(&self, id: Uuid) -> AppResult<Option<Submission>>;

    /// Apply a terminal judging outcome as one atomic update. Returns false
    /// without modifying anything when the submission is already terminal;
    /// a verdict never reverts once set.
    async fn finalize_submission(&self, id: Uuid, outcome: JudgeOutcome) -> AppResult<bool>;

    // -- problems ------------------------------------------------------------

    async fn get_problem(&self, id: Uuid) -> AppResult<Option<Problem>>;

    async fn get_problem_by_slug(&self, slug: &str) -> AppResult<Option<Problem>>;

    async fn incr_problem_submissions(&self, id: Uuid) -> AppResult<()>;

    async fn incr_problem_accepted(&self, id: Uuid) -> AppResult<()>;

    // -- users ---------------------------------------------------------------

    async fn get_user(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn incr_user_submissions(&self, id: Uuid) -> AppResult<()>;

    async fn incr_user_accepted(&self, id: Uuid) -> AppResult<()>;

    /// Add a solved-problem record unless one already exists for that
    /// problem. Returns true when this call created the record; the caller
    /// that observes true owns the first-solve side effects. Concurrent
    /// acceptances of the same problem race safely: exactly one wins.
    async fn record_solve_if_absent(&self, user_id: Uuid, solve: SolvedProblem)
        -> AppResult<bool>;

    /// First-solve stat bump: total solved, per-difficulty counter and
    /// total points, plus last-active refresh
    async fn apply_first_solve_stats(
        &self,
        user_id: Uuid,
        difficulty: Difficulty,
        points: u32,
    ) -> AppResult<()>;

    /// Pointwise-minimum update of a solved problem's best runtime/memory;
    /// a previously better recording never regresses
    async fn improve_best_metrics(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
        runtime_ms: f64,
        memory_kb: u64,
    ) -> AppResult<()>;

    /// Overwrite streak counters and the last-active timestamp
    async fn set_streak(
        &self,
        user_id: Uuid,
        streak: u32,
        max_streak: u32,
        last_active: DateTime<Utc>,
    ) -> AppResult<()>;

    // -- contests ------------------------------------------------------------

    async fn get_contest(&self, id: Uuid) -> AppResult<Option<Contest>>;

    /// Credit a contest first-solve to a participant: score, penalty,
    /// solved count, solve record and last-submission timestamp, as one
    /// atomic update. Returns false without modifying anything when the
    /// participant is missing or already solved that problem.
    async fn record_contest_solve(
        &self,
        contest_id: Uuid,
        user_id: Uuid,
        problem_id: Uuid,
        points: u32,
        penalty_minutes: i64,
        solved_at: DateTime<Utc>,
    ) -> AppResult<bool>;
}
