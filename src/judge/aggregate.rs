//! Verdict aggregation

use crate::models::{TestCaseResult, Verdict};

/// Verdict precedence, harshest first: a compile failure makes everything
/// else meaningless, and the worst observed failure class should dominate
/// so the submitter gets one actionable verdict.
const PRECEDENCE: [Verdict; 6] = [
    Verdict::CompilationError,
    Verdict::RuntimeError,
    Verdict::TimeLimitExceeded,
    Verdict::MemoryLimitExceeded,
    Verdict::WrongAnswer,
    Verdict::Accepted,
];

/// Collapse per-test-case results into one overall verdict.
///
/// `Accepted` only wins when every case is accepted. An empty or unmatched
/// list falls back to `RuntimeError`; that path never fires in correct
/// operation (submit rejects problems with zero test cases) and is logged
/// as a signal of an upstream bug.
pub fn aggregate_verdict(results: &[TestCaseResult]) -> Verdict {
    for verdict in PRECEDENCE {
        if results.iter().any(|r| r.verdict == verdict) {
            return verdict;
        }
    }

    tracing::warn!(
        total = results.len(),
        "no test case verdict matched the precedence table; defaulting to runtime_error"
    );
    Verdict::RuntimeError
}
