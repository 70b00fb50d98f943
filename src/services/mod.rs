//! Business logic layer
//!
//! Services are stateless unit structs with static async methods. They
//! operate on [`crate::state::AppState`] and the storage trait, keeping
//! orchestration concerns out of the models and the execution backend.

pub mod judge_service;
pub mod scoring_service;
pub mod submission_service;

pub use judge_service::JudgeService;
pub use scoring_service::ScoringService;
pub use submission_service::{RunSampleRequest, SubmissionService, SubmitReceipt, SubmitRequest};
