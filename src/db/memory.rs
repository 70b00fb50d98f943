//! In-memory store implementation

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    Contest, ContestSolve, Difficulty, JudgeOutcome, Participant, Problem, SolvedProblem,
    Submission, User,
};

use super::store::JudgeStore;

/// In-process [`JudgeStore`] over locked hash maps.
///
/// Every operation runs under a single write guard per collection, which
/// makes the check-then-mutate sequences (solve-set membership, finalize
/// first-writer-wins, contest solve crediting) atomic.
#[derive(Default)]
pub struct MemoryStore {
    submissions: RwLock<HashMap<Uuid, Submission>>,
    problems: RwLock<HashMap<Uuid, Problem>>,
    users: RwLock<HashMap<Uuid, User>>,
    contests: RwLock<HashMap<Uuid, Contest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Seeding helpers for tests and embedded deployments.

    pub async fn insert_problem(&self, problem: Problem) {
        self.problems.write().await.insert(problem.id, problem);
    }

    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn insert_contest(&self, contest: Contest) {
        self.contests.write().await.insert(contest.id, contest);
    }

    /// Register a user as a contest participant, if not already registered
    pub async fn register_participant(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let mut contests = self.contests.write().await;
        let contest = contests
            .get_mut(&contest_id)
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        if contest.participant(user_id).is_none() {
            contest.participants.push(Participant::new(user_id));
        }
        Ok(())
    }
}

#[async_trait]
impl JudgeStore for MemoryStore {
    async fn insert_submission(&self, submission: Submission) -> AppResult<()> {
        self.submissions
            .write()
            .await
            .insert(submission.id, submission);
        Ok(())
    }

    async fn get_submission(&self, id: Uuid) -> AppResult<Option<Submission>> {
        Ok(self.submissions.read().await.get(&id).cloned())
    }

    async fn finalize_submission(&self, id: Uuid, outcome: JudgeOutcome) -> AppResult<bool> {
        let mut submissions = self.submissions.write().await;
        let submission = submissions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        if submission.verdict.is_terminal() {
            return Ok(false);
        }

        submission.verdict = outcome.verdict;
        submission.test_results = outcome.test_results;
        submission.runtime_ms = outcome.runtime_ms;
        submission.memory_kb = outcome.memory_kb;
        submission.passed_test_cases = outcome.passed_test_cases;
        submission.total_test_cases = outcome.total_test_cases;
        submission.compile_output = outcome.compile_output;
        submission.judged_at = Some(outcome.judged_at);
        Ok(true)
    }

    async fn get_problem(&self, id: Uuid) -> AppResult<Option<Problem>> {
        Ok(self.problems.read().await.get(&id).cloned())
    }

    async fn get_problem_by_slug(&self, slug: &str) -> AppResult<Option<Problem>> {
        Ok(self
            .problems
            .read()
            .await
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn incr_problem_submissions(&self, id: Uuid) -> AppResult<()> {
        if let Some(problem) = self.problems.write().await.get_mut(&id) {
            problem.stats.total_submissions += 1;
        }
        Ok(())
    }

    async fn incr_problem_accepted(&self, id: Uuid) -> AppResult<()> {
        if let Some(problem) = self.problems.write().await.get_mut(&id) {
            problem.stats.accepted_submissions += 1;
        }
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn incr_user_submissions(&self, id: Uuid) -> AppResult<()> {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.stats.total_submissions += 1;
        }
        Ok(())
    }

    async fn incr_user_accepted(&self, id: Uuid) -> AppResult<()> {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.stats.accepted_submissions += 1;
        }
        Ok(())
    }

    async fn record_solve_if_absent(
        &self,
        user_id: Uuid,
        solve: SolvedProblem,
    ) -> AppResult<bool> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if user.has_solved(solve.problem_id) {
            return Ok(false);
        }
        user.solved_problems.push(solve);
        Ok(true)
    }

    async fn apply_first_solve_stats(
        &self,
        user_id: Uuid,
        difficulty: Difficulty,
        points: u32,
    ) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        user.stats.total_solved += 1;
        match difficulty {
            Difficulty::Easy => user.stats.easy_solved += 1,
            Difficulty::Medium => user.stats.medium_solved += 1,
            Difficulty::Hard => user.stats.hard_solved += 1,
        }
        user.stats.total_points += u64::from(points);
        user.stats.last_active_date = Some(Utc::now());
        Ok(())
    }

    async fn improve_best_metrics(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
        runtime_ms: f64,
        memory_kb: u64,
    ) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if let Some(solve) = user
            .solved_problems
            .iter_mut()
            .find(|s| s.problem_id == problem_id)
        {
            solve.best_runtime_ms = solve.best_runtime_ms.min(runtime_ms);
            solve.best_memory_kb = solve.best_memory_kb.min(memory_kb);
        }
        Ok(())
    }

    async fn set_streak(
        &self,
        user_id: Uuid,
        streak: u32,
        max_streak: u32,
        last_active: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        user.stats.streak = streak;
        user.stats.max_streak = max_streak;
        user.stats.last_active_date = Some(last_active);
        Ok(())
    }

    async fn get_contest(&self, id: Uuid) -> AppResult<Option<Contest>> {
        Ok(self.contests.read().await.get(&id).cloned())
    }

    async fn record_contest_solve(
        &self,
        contest_id: Uuid,
        user_id: Uuid,
        problem_id: Uuid,
        points: u32,
        penalty_minutes: i64,
        solved_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut contests = self.contests.write().await;
        let contest = contests
            .get_mut(&contest_id)
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        let Some(participant) = contest
            .participants
            .iter_mut()
            .find(|p| p.user_id == user_id)
        else {
            return Ok(false);
        };

        if participant.has_solved(problem_id) {
            return Ok(false);
        }

        participant.score += points;
        participant.penalty += penalty_minutes;
        participant.solved_count += 1;
        participant.solved_problems.push(ContestSolve {
            problem_id,
            solved_at,
            time_penalty: penalty_minutes,
        });
        participant.last_submission_at = Some(solved_at);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verdict;

    fn solve(problem_id: Uuid) -> SolvedProblem {
        SolvedProblem {
            problem_id,
            language: "cpp".to_string(),
            best_runtime_ms: 40.0,
            best_memory_kb: 1200,
            solved_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn finalize_is_first_writer_wins() {
        let store = MemoryStore::new();
        let submission =
            Submission::new(Uuid::new_v4(), Uuid::new_v4(), None, "cpp", "code", 0);
        let id = submission.id;
        store.insert_submission(submission).await.unwrap();

        let first = JudgeOutcome::from_results(Verdict::Accepted, Vec::new());
        let second = JudgeOutcome::workflow_failure("late".to_string());

        assert!(store.finalize_submission(id, first).await.unwrap());
        assert!(!store.finalize_submission(id, second).await.unwrap());

        let stored = store.get_submission(id).await.unwrap().unwrap();
        assert_eq!(stored.verdict, Verdict::Accepted);
    }

    #[tokio::test]
    async fn record_solve_if_absent_is_once_per_problem() {
        let store = MemoryStore::new();
        let user = User::new("alice");
        let user_id = user.id;
        store.insert_user(user).await;

        let problem_id = Uuid::new_v4();
        assert!(store
            .record_solve_if_absent(user_id, solve(problem_id))
            .await
            .unwrap());
        assert!(!store
            .record_solve_if_absent(user_id, solve(problem_id))
            .await
            .unwrap());

        let stored = store.get_user(user_id).await.unwrap().unwrap();
        assert_eq!(stored.solved_problems.len(), 1);
    }

    #[tokio::test]
    async fn improve_best_metrics_never_regresses() {
        let store = MemoryStore::new();
        let user = User::new("alice");
        let user_id = user.id;
        store.insert_user(user).await;

        let problem_id = Uuid::new_v4();
        store
            .record_solve_if_absent(user_id, solve(problem_id))
            .await
            .unwrap();

        store
            .improve_best_metrics(user_id, problem_id, 55.0, 2000)
            .await
            .unwrap();
        let stored = store.get_user(user_id).await.unwrap().unwrap();
        assert_eq!(stored.solved_problems[0].best_runtime_ms, 40.0);
        assert_eq!(stored.solved_problems[0].best_memory_kb, 1200);

        store
            .improve_best_metrics(user_id, problem_id, 20.0, 800)
            .await
            .unwrap();
        let stored = store.get_user(user_id).await.unwrap().unwrap();
        assert_eq!(stored.solved_problems[0].best_runtime_ms, 20.0);
        assert_eq!(stored.solved_problems[0].best_memory_kb, 800);
    }

    #[tokio::test]
    async fn contest_solve_is_a_noop_for_unregistered_users() {
        let store = MemoryStore::new();
        let contest = Contest::new("Round", Utc::now(), Utc::now());
        let contest_id = contest.id;
        store.insert_contest(contest).await;

        let credited = store
            .record_contest_solve(
                contest_id,
                Uuid::new_v4(),
                Uuid::new_v4(),
                100,
                10,
                Utc::now(),
            )
            .await
            .unwrap();
        assert!(!credited);
    }
}
