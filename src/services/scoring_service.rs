//! Scoring, streaks and contest credit
//!
//! Everything that happens to a user after an accepted verdict: first-solve
//! points, best-metric tracking, the daily activity streak and contest
//! leaderboard credit. All of it is keyed off atomic, membership-gated
//! store operations so a repeat acceptance is a cheap no-op.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::constants::DEFAULT_CONTEST_PROBLEM_POINTS;
use crate::db::JudgeStore;
use crate::error::{AppError, AppResult};
use crate::models::{Problem, SolvedProblem};
use crate::utils::time::{days_between, minutes_since, now_utc};

pub struct ScoringService;

impl ScoringService {
    /// Apply every accepted-submission side effect for `user_id`.
    #[allow(clippy::too_many_arguments)]
    pub async fn on_accepted(
        store: &dyn JudgeStore,
        user_id: Uuid,
        problem: &Problem,
        language: &str,
        runtime_ms: f64,
        memory_kb: u64,
        contest_id: Option<Uuid>,
    ) -> AppResult<()> {
        Self::on_accepted_at(
            store, user_id, problem, language, runtime_ms, memory_kb, contest_id, now_utc(),
        )
        .await
    }

    /// Same as [`Self::on_accepted`] with an explicit clock, so streak and
    /// penalty arithmetic is testable at fixed instants.
    #[allow(clippy::too_many_arguments)]
    pub async fn on_accepted_at(
        store: &dyn JudgeStore,
        user_id: Uuid,
        problem: &Problem,
        language: &str,
        runtime_ms: f64,
        memory_kb: u64,
        contest_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        store.incr_user_accepted(user_id).await?;

        let user = store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

        let (streak, max_streak) = compute_streak(
            user.stats.streak,
            user.stats.max_streak,
            user.stats.last_active_date,
            now,
        );

        let solve = SolvedProblem {
            problem_id: problem.id,
            language: language.to_string(),
            best_runtime_ms: runtime_ms,
            best_memory_kb: memory_kb,
            solved_at: now,
        };

        let first_solve = store.record_solve_if_absent(user_id, solve).await?;
        if first_solve {
            store
                .apply_first_solve_stats(user_id, problem.difficulty, problem.points)
                .await?;
            tracing::info!(
                %user_id,
                problem = %problem.slug,
                points = problem.points,
                "first solve credited"
            );
        } else {
            store
                .improve_best_metrics(user_id, problem.id, runtime_ms, memory_kb)
                .await?;
        }

        store.set_streak(user_id, streak, max_streak, now).await?;

        if let Some(contest_id) = contest_id {
            Self::apply_contest_score(store, contest_id, user_id, problem.id, now).await?;
        }

        Ok(())
    }

    /// Credit a contest solve. Missing contests and unregistered or
    /// already-credited participants are logged no-ops, never errors; the
    /// acceptance itself already happened and must stand.
    async fn apply_contest_score(
        store: &dyn JudgeStore,
        contest_id: Uuid,
        user_id: Uuid,
        problem_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let Some(contest) = store.get_contest(contest_id).await? else {
            tracing::warn!(%contest_id, "contest vanished before scoring, skipping credit");
            return Ok(());
        };

        let points = contest
            .problem_points(problem_id)
            .unwrap_or(DEFAULT_CONTEST_PROBLEM_POINTS);
        let penalty = minutes_since(contest.start_time, now);

        let credited = store
            .record_contest_solve(contest_id, user_id, problem_id, points, penalty, now)
            .await?;
        if credited {
            tracing::info!(%contest_id, %user_id, points, penalty, "contest solve credited");
        } else {
            tracing::debug!(%contest_id, %user_id, "contest solve already credited or not registered");
        }

        Ok(())
    }
}

/// Daily streak update at an acceptance instant.
///
/// First ever activity starts the streak at 1. Same UTC day leaves it
/// unchanged, consecutive days extend it, a gap resets it to 1. The max
/// streak never decreases.
pub(crate) fn compute_streak(
    streak: u32,
    max_streak: u32,
    last_active: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (u32, u32) {
    let next = match last_active {
        None => 1,
        Some(last) => match days_between(last, now) {
            0 => streak,
            1 => streak + 1,
            _ => 1,
        },
    };
    (next, max_streak.max(next))
}
