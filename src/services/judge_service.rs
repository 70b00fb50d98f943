//! Judging workflow
//!
//! Pulls a pending submission, runs it against every test case through the
//! orchestrator, aggregates a verdict and persists the outcome, then hands
//! accepted submissions to the scoring service.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::judge::aggregate_verdict;
use crate::models::JudgeOutcome;
use crate::services::ScoringService;
use crate::state::AppState;

pub struct JudgeService;

impl JudgeService {
    /// Judge one submission end to end. Never returns an error: any
    /// workflow failure is converted into a terminal runtime_error outcome
    /// so the submission cannot stay pending forever.
    pub async fn judge(state: &AppState, submission_id: Uuid) {
        if let Err(err) = Self::try_judge(state, submission_id).await {
            tracing::error!(%submission_id, error = %err, "judging failed");
            let outcome = JudgeOutcome::workflow_failure(format!("Judging failed: {err}"));
            if let Err(persist_err) = state
                .store()
                .finalize_submission(submission_id, outcome)
                .await
            {
                tracing::error!(
                    %submission_id,
                    error = %persist_err,
                    "could not persist failure outcome"
                );
            }
        }
    }

    async fn try_judge(state: &AppState, submission_id: Uuid) -> AppResult<()> {
        let submission = state
            .store()
            .get_submission(submission_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Submission {submission_id} not found")))?;

        if submission.verdict.is_terminal() {
            tracing::debug!(%submission_id, verdict = %submission.verdict, "already judged, skipping");
            return Ok(());
        }

        let problem = state
            .store()
            .get_problem(submission.problem_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Problem {} not found", submission.problem_id))
            })?;

        let cases = problem.all_test_cases();
        if cases.is_empty() {
            return Err(AppError::Validation(
                "Problem has no test cases configured".to_string(),
            ));
        }

        let results = state
            .orchestrator()
            .run_all(
                &submission.source_code,
                &submission.language,
                &cases,
                problem.time_limit_ms,
                problem.memory_limit_mb,
            )
            .await?;

        let verdict = aggregate_verdict(&results);
        let outcome = JudgeOutcome::from_results(verdict, results);
        let runtime_ms = outcome.runtime_ms;
        let memory_kb = outcome.memory_kb;
        let passed = outcome.passed_test_cases;
        let total = outcome.total_test_cases;

        let applied = state
            .store()
            .finalize_submission(submission_id, outcome)
            .await?;
        if !applied {
            tracing::debug!(%submission_id, "finalized elsewhere, dropping duplicate outcome");
            return Ok(());
        }

        tracing::info!(
            %submission_id,
            %verdict,
            passed,
            total,
            runtime_ms,
            "submission judged"
        );

        if verdict.is_accepted() {
            state.store().incr_problem_accepted(problem.id).await?;
            ScoringService::on_accepted(
                state.store(),
                submission.user_id,
                &problem,
                &submission.language,
                runtime_ms,
                memory_kb,
                submission.contest_id,
            )
            .await?;
        }

        Ok(())
    }
}
