//! Time utilities

use chrono::{DateTime, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Number of whole calendar days between two instants, at day granularity.
///
/// The time-of-day component is discarded on both sides, so 23:59 on one day
/// to 00:01 the next still counts as one day.
pub fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    later
        .date_naive()
        .signed_duration_since(earlier.date_naive())
        .num_days()
}

/// Whole minutes elapsed from `start` to `now`, clamped at zero
pub fn minutes_since(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - start).num_minutes().max(0)
}
