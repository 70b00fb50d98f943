//! Submission intake and retrieval

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::{roles, SAMPLE_RUN_CASE_LIMIT};
use crate::error::{AppError, AppResult};
use crate::models::{ContestStatus, Submission, TestCase, TestCaseResult, Verdict};
use crate::state::AppState;
use crate::utils::validation::{
    validate_custom_input, validate_language, validate_role, validate_source_code,
};

/// Payload for a scored submission
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitRequest {
    #[validate(length(min = 1, message = "Problem slug is required"))]
    pub problem_slug: String,
    #[validate(length(min = 1, message = "Source code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Language is required"))]
    pub language: String,
    /// Wall time reported by the submitter's own timer, in seconds
    #[serde(default)]
    pub time_taken_secs: u64,
    pub contest_id: Option<Uuid>,
}

/// Payload for an ad-hoc sample run; never persisted, never scored
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RunSampleRequest {
    #[validate(length(min = 1, message = "Problem slug is required"))]
    pub problem_slug: String,
    #[validate(length(min = 1, message = "Source code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Language is required"))]
    pub language: String,
    pub custom_input: Option<String>,
}

/// What the submitter gets back immediately; the verdict arrives later
/// through the judge queue.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitReceipt {
    pub submission_id: Uuid,
    pub verdict: Verdict,
}

pub struct SubmissionService;

impl SubmissionService {
    /// Validate and persist a submission, then enqueue it for judging.
    /// Submission counters are bumped eagerly at intake, not at verdict
    /// time, so they count attempts rather than completed judgings.
    pub async fn submit(
        state: &AppState,
        user_id: Uuid,
        payload: SubmitRequest,
    ) -> AppResult<SubmitReceipt> {
        payload.validate()?;
        validate_language(&payload.language)
            .map_err(|_| AppError::UnsupportedLanguage(payload.language.clone()))?;
        validate_source_code(&payload.code).map_err(|e| AppError::Validation(e.to_string()))?;

        let problem = state
            .store()
            .get_problem_by_slug(&payload.problem_slug)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        if problem.test_case_count() == 0 {
            return Err(AppError::Validation(
                "Problem has no test cases configured".to_string(),
            ));
        }

        if let Some(contest_id) = payload.contest_id {
            let contest = state
                .store()
                .get_contest(contest_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;
            if contest.status() != ContestStatus::Ongoing {
                return Err(AppError::Validation("Contest is not active".to_string()));
            }
            if contest.participant(user_id).is_none() {
                return Err(AppError::Forbidden(
                    "Not registered for this contest".to_string(),
                ));
            }
        }

        let submission = Submission::new(
            user_id,
            problem.id,
            payload.contest_id,
            &payload.language,
            &payload.code,
            payload.time_taken_secs,
        );
        let submission_id = submission.id;

        state.store().insert_submission(submission).await?;
        state.store().incr_problem_submissions(problem.id).await?;
        state.store().incr_user_submissions(user_id).await?;

        state.queue().enqueue(submission_id).await?;

        tracing::info!(
            %submission_id,
            %user_id,
            problem = %problem.slug,
            language = %payload.language,
            contest = ?payload.contest_id,
            "submission queued"
        );

        Ok(SubmitReceipt {
            submission_id,
            verdict: Verdict::Pending,
        })
    }

    /// Run code against a problem's sample cases, or one ad-hoc custom
    /// input, synchronously. Nothing is stored and no stats move.
    pub async fn run_sample(
        state: &AppState,
        payload: RunSampleRequest,
    ) -> AppResult<Vec<TestCaseResult>> {
        payload.validate()?;
        validate_language(&payload.language)
            .map_err(|_| AppError::UnsupportedLanguage(payload.language.clone()))?;
        validate_source_code(&payload.code).map_err(|e| AppError::Validation(e.to_string()))?;

        let problem = state
            .store()
            .get_problem_by_slug(&payload.problem_slug)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        let cases: Vec<TestCase> = match payload.custom_input {
            Some(input) => {
                validate_custom_input(&input).map_err(|e| AppError::Validation(e.to_string()))?;
                vec![TestCase::custom(&input)]
            }
            None => problem
                .sample_test_cases
                .iter()
                .take(SAMPLE_RUN_CASE_LIMIT)
                .cloned()
                .collect(),
        };

        if cases.is_empty() {
            return Err(AppError::Validation(
                "Problem has no sample test cases".to_string(),
            ));
        }

        state
            .orchestrator()
            .run_all(
                &payload.code,
                &payload.language,
                &cases,
                problem.time_limit_ms,
                problem.memory_limit_mb,
            )
            .await
    }

    /// Fetch a submission for a viewer. The owner and admins see the full
    /// record; anyone else gets it with the source code stripped.
    pub async fn get_submission(
        state: &AppState,
        id: Uuid,
        requester_id: Uuid,
        requester_role: &str,
    ) -> AppResult<Submission> {
        validate_role(requester_role).map_err(|e| AppError::Validation(e.to_string()))?;

        let submission = state
            .store()
            .get_submission(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        if submission.user_id == requester_id || requester_role == roles::ADMIN {
            Ok(submission)
        } else {
            Ok(submission.redacted())
        }
    }
}
