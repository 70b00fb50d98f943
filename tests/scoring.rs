//! Scoring invariants: first-solve points, best-metric monotonicity,
//! streak arithmetic and contest leaderboard credit.

mod common;

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use algoarena::db::{JudgeStore, MemoryStore};
use algoarena::error::AppError;
use algoarena::models::{Contest, ContestProblem, Difficulty, Problem, Verdict};
use algoarena::services::{ScoringService, SubmissionService, SubmitRequest};

use common::{harness, seed_user, two_sum_answers, two_sum_problem, FakeBackend, Script};

fn day(d: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, d, 12, 0, 0).unwrap()
}

async fn accept_at(
    store: &MemoryStore,
    user_id: Uuid,
    problem: &Problem,
    runtime_ms: f64,
    memory_kb: u64,
    contest_id: Option<Uuid>,
    at: chrono::DateTime<Utc>,
) {
    ScoringService::on_accepted_at(
        store, user_id, problem, "rust", runtime_ms, memory_kb, contest_id, at,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn repeat_acceptance_awards_points_only_once() {
    let store = MemoryStore::new();
    let problem = Problem::new("Median Window", 42, Difficulty::Medium);
    store.insert_problem(problem.clone()).await;
    let user = seed_user(&store, "alice").await;

    accept_at(&store, user.id, &problem, 100.0, 4096, None, day(1)).await;
    accept_at(&store, user.id, &problem, 100.0, 4096, None, day(1)).await;

    let user = store.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(user.stats.total_solved, 1);
    assert_eq!(user.stats.medium_solved, 1);
    assert_eq!(user.stats.total_points, 25);
    assert_eq!(user.stats.accepted_submissions, 2);
    assert_eq!(user.solved_problems.len(), 1);
}

#[tokio::test]
async fn best_metrics_only_ever_improve() {
    let store = MemoryStore::new();
    let problem = Problem::new("Parser Repair", 7, Difficulty::Hard);
    store.insert_problem(problem.clone()).await;
    let user = seed_user(&store, "bob").await;

    accept_at(&store, user.id, &problem, 100.0, 8192, None, day(1)).await;
    accept_at(&store, user.id, &problem, 40.0, 9000, None, day(1)).await;
    accept_at(&store, user.id, &problem, 80.0, 2048, None, day(1)).await;

    let user = store.get_user(user.id).await.unwrap().unwrap();
    let solve = &user.solved_problems[0];
    // Runtime and memory improve independently of each other.
    assert_eq!(solve.best_runtime_ms, 40.0);
    assert_eq!(solve.best_memory_kb, 2048);
}

#[tokio::test]
async fn streak_extends_daily_and_resets_after_a_gap() {
    let store = MemoryStore::new();
    let first = Problem::new("A", 1, Difficulty::Easy);
    let second = Problem::new("B", 2, Difficulty::Easy);
    let third = Problem::new("C", 3, Difficulty::Easy);
    let fourth = Problem::new("D", 4, Difficulty::Easy);
    for p in [&first, &second, &third, &fourth] {
        store.insert_problem((*p).clone()).await;
    }
    let user = seed_user(&store, "carol").await;

    accept_at(&store, user.id, &first, 10.0, 1024, None, day(1)).await;
    accept_at(&store, user.id, &second, 10.0, 1024, None, day(2)).await;
    accept_at(&store, user.id, &third, 10.0, 1024, None, day(2)).await;

    let stats = store.get_user(user.id).await.unwrap().unwrap().stats;
    assert_eq!(stats.streak, 2);
    assert_eq!(stats.max_streak, 2);

    accept_at(&store, user.id, &fourth, 10.0, 1024, None, day(6)).await;

    let stats = store.get_user(user.id).await.unwrap().unwrap().stats;
    assert_eq!(stats.streak, 1);
    assert_eq!(stats.max_streak, 2);
}

#[tokio::test]
async fn contest_solve_credits_score_and_penalty_once() {
    let store = MemoryStore::new();
    let problem = Problem::new("Bracket Depth", 9, Difficulty::Medium);
    store.insert_problem(problem.clone()).await;
    let user = seed_user(&store, "dave").await;

    let start = day(10) - Duration::minutes(30);
    let mut contest = Contest::new("Weekly Round 3", start, day(10) + Duration::hours(1));
    contest.problems.push(ContestProblem {
        problem_id: problem.id,
        points: Some(150),
    });
    let contest_id = contest.id;
    store.insert_contest(contest).await;
    store.register_participant(contest_id, user.id).await.unwrap();

    accept_at(&store, user.id, &problem, 55.0, 4096, Some(contest_id), day(10)).await;
    accept_at(&store, user.id, &problem, 30.0, 4096, Some(contest_id), day(10)).await;

    let contest = store.get_contest(contest_id).await.unwrap().unwrap();
    let participant = contest.participant(user.id).unwrap();
    assert_eq!(participant.score, 150);
    assert_eq!(participant.penalty, 30);
    assert_eq!(participant.solved_count, 1);
    assert!(participant.has_solved(problem.id));
    assert_eq!(participant.last_submission_at, Some(day(10)));
}

#[tokio::test]
async fn unlisted_contest_problem_earns_default_points() {
    let store = MemoryStore::new();
    let problem = Problem::new("Grid Walk", 11, Difficulty::Easy);
    store.insert_problem(problem.clone()).await;
    let user = seed_user(&store, "erin").await;

    let start = day(10) - Duration::minutes(5);
    let contest = Contest::new("Weekly Round 4", start, day(10) + Duration::hours(2));
    let contest_id = contest.id;
    store.insert_contest(contest).await;
    store.register_participant(contest_id, user.id).await.unwrap();

    accept_at(&store, user.id, &problem, 20.0, 1024, Some(contest_id), day(10)).await;

    let contest = store.get_contest(contest_id).await.unwrap().unwrap();
    let participant = contest.participant(user.id).unwrap();
    assert_eq!(participant.score, 100);
    assert_eq!(participant.penalty, 5);
}

#[tokio::test]
async fn verdict_landing_after_the_contest_ends_still_earns_credit() {
    let store = MemoryStore::new();
    let problem = Problem::new("Last Minute", 15, Difficulty::Medium);
    store.insert_problem(problem.clone()).await;
    let user = seed_user(&store, "olga").await;

    // Submitted inside the window, judged one minute after it closed. The
    // window gate lives at intake; credit follows the acceptance.
    let start = day(10) - Duration::minutes(60);
    let end = day(10) + Duration::minutes(1);
    let contest = Contest::new("Weekly Round 5", start, end);
    let contest_id = contest.id;
    store.insert_contest(contest).await;
    store.register_participant(contest_id, user.id).await.unwrap();

    let judged_at = end + Duration::minutes(1);
    accept_at(&store, user.id, &problem, 25.0, 4096, Some(contest_id), judged_at).await;

    let contest = store.get_contest(contest_id).await.unwrap().unwrap();
    let participant = contest.participant(user.id).unwrap();
    assert_eq!(participant.score, 100);
    assert_eq!(participant.penalty, 62);
    assert_eq!(participant.solved_count, 1);
}

#[tokio::test]
async fn missing_contest_never_poisons_the_acceptance() {
    let store = MemoryStore::new();
    let problem = Problem::new("Edge Case", 13, Difficulty::Easy);
    store.insert_problem(problem.clone()).await;
    let user = seed_user(&store, "frank").await;

    // A dangling contest id is logged and skipped; the solve still lands.
    accept_at(&store, user.id, &problem, 20.0, 1024, Some(Uuid::new_v4()), day(1)).await;

    let user = store.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(user.stats.total_solved, 1);
}

#[tokio::test]
async fn contest_submission_requires_registration() {
    let (state, store) = harness(FakeBackend::new(Script::Answers(two_sum_answers())));
    store.insert_problem(two_sum_problem()).await;
    let user = seed_user(&store, "grace").await;

    let now = Utc::now();
    let contest = Contest::new("Open Round", now - Duration::minutes(10), now + Duration::hours(1));
    let contest_id = contest.id;
    store.insert_contest(contest).await;

    let err = SubmissionService::submit(
        &state,
        user.id,
        SubmitRequest {
            problem_slug: "two-sum".to_string(),
            code: "fn main() {}".to_string(),
            language: "rust".to_string(),
            time_taken_secs: 0,
            contest_id: Some(contest_id),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn submissions_outside_the_contest_window_are_rejected() {
    let (state, store) = harness(FakeBackend::new(Script::Answers(two_sum_answers())));
    store.insert_problem(two_sum_problem()).await;
    let user = seed_user(&store, "hana").await;

    let now = Utc::now();
    let contest = Contest::new("Past Round", now - Duration::hours(3), now - Duration::hours(1));
    let contest_id = contest.id;
    store.insert_contest(contest).await;
    store.register_participant(contest_id, user.id).await.unwrap();

    let err = SubmissionService::submit(
        &state,
        user.id,
        SubmitRequest {
            problem_slug: "two-sum".to_string(),
            code: "fn main() {}".to_string(),
            language: "rust".to_string(),
            time_taken_secs: 0,
            contest_id: Some(contest_id),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn contest_pipeline_credits_through_the_queue() {
    let (state, store) = harness(FakeBackend::new(Script::Answers(two_sum_answers())));
    let problem = two_sum_problem();
    let problem_id = problem.id;
    store.insert_problem(problem).await;
    let user = seed_user(&store, "ivan").await;

    let now = Utc::now();
    let contest = Contest::new("Live Round", now - Duration::minutes(1), now + Duration::hours(1));
    let contest_id = contest.id;
    store.insert_contest(contest).await;
    store.register_participant(contest_id, user.id).await.unwrap();

    let receipt = SubmissionService::submit(
        &state,
        user.id,
        SubmitRequest {
            problem_slug: "two-sum".to_string(),
            code: "fn main() { solve(); }".to_string(),
            language: "rust".to_string(),
            time_taken_secs: 30,
            contest_id: Some(contest_id),
        },
    )
    .await
    .unwrap();

    let mut judged = None;
    for _ in 0..400 {
        let submission = state.store().get_submission(receipt.submission_id).await.unwrap();
        if let Some(s) = submission {
            if s.verdict.is_terminal() {
                judged = Some(s);
                break;
            }
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    let judged = judged.expect("submission never judged");
    assert_eq!(judged.verdict, Verdict::Accepted);
    assert!(judged.is_contest);

    let contest = store.get_contest(contest_id).await.unwrap().unwrap();
    let participant = contest.participant(user.id).unwrap();
    assert_eq!(participant.score, 100);
    assert_eq!(participant.solved_count, 1);
    assert!(participant.has_solved(problem_id));
}
