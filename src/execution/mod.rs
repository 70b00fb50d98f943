//! Execution backend abstraction
//!
//! The actual sandboxed compile-and-run engine is an external HTTP service.
//! This module defines the narrow contract the judging core consumes: submit
//! one (code, language, stdin, limits) unit for an opaque handle, then poll
//! the handle until the backend reports a settled status.

mod judge0;

pub use judge0::Judge0Client;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Verdict;

/// One unit of execution: a single program run against a single stdin
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub source_code: String,
    /// Backend-specific numeric language id
    pub language_id: u32,
    pub stdin: String,
    pub time_limit_ms: u64,
    pub memory_limit_mb: u64,
}

/// Opaque reference to one in-flight execution on the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionHandle(pub String);

/// Backend-reported execution status, mapped from its status codes.
///
/// The backend never reports `WrongAnswer`: output comparison is the
/// orchestrator's job, not the execution engine's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    /// Waiting for a backend worker
    InQueue,
    /// Compiling or running
    Processing,
    /// Ran to completion without failure; output not yet compared
    Finished,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompilationError,
}

impl BackendStatus {
    /// Map a backend status code onto the closed status set. Unknown codes
    /// collapse to `RuntimeError` rather than passing through verbatim.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Self::InQueue,
            2 => Self::Processing,
            // 4 is the backend's own output comparison, which this system
            // never requests; a run that got that far completed execution.
            3 | 4 => Self::Finished,
            5 => Self::TimeLimitExceeded,
            6 => Self::CompilationError,
            12 => Self::MemoryLimitExceeded,
            _ => Self::RuntimeError,
        }
    }

    /// Whether the backend is done with this execution
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::InQueue | Self::Processing)
    }

    /// Verdict for a settled, non-successful status
    pub fn failure_verdict(&self) -> Option<Verdict> {
        match self {
            Self::TimeLimitExceeded => Some(Verdict::TimeLimitExceeded),
            Self::MemoryLimitExceeded => Some(Verdict::MemoryLimitExceeded),
            Self::RuntimeError => Some(Verdict::RuntimeError),
            Self::CompilationError => Some(Verdict::CompilationError),
            Self::InQueue | Self::Processing | Self::Finished => None,
        }
    }
}

/// Decoded result of polling one execution handle
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub status: BackendStatus,
    pub stdout: String,
    pub stderr: String,
    pub compile_output: String,
    pub time_ms: f64,
    pub memory_kb: u64,
}

/// The external compile-and-run capability consumed by the orchestrator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Submit one execution unit and obtain an opaque handle
    async fn submit(&self, request: ExecutionRequest) -> AppResult<ExecutionHandle>;

    /// Poll an outstanding handle for its current status and output
    async fn poll(&self, handle: &ExecutionHandle) -> AppResult<ExecutionReport>;
}
