//! Contest model

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contest status, always derived from the clock and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Upcoming,
    Ongoing,
    Ended,
}

impl std::fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Ongoing => write!(f, "ongoing"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// A problem attached to a contest, with its configured point value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestProblem {
    pub problem_id: Uuid,
    /// None falls back to the default contest problem points
    pub points: Option<u32>,
}

/// One first-solve record within a contest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestSolve {
    pub problem_id: Uuid,
    pub solved_at: DateTime<Utc>,
    /// Whole minutes from contest start to this first solve
    pub time_penalty: i64,
}

/// Per-user scoring state within a contest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: Uuid,
    pub score: u32,
    /// Sum of per-problem time penalties, in minutes
    pub penalty: i64,
    pub solved_count: u32,
    pub solved_problems: Vec<ContestSolve>,
    pub last_submission_at: Option<DateTime<Utc>>,
    pub registered_at: DateTime<Utc>,
}

impl Participant {
    /// Register a participant with a zeroed scorecard
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            score: 0,
            penalty: 0,
            solved_count: 0,
            solved_problems: Vec::new(),
            last_submission_at: None,
            registered_at: Utc::now(),
        }
    }

    /// Whether this participant already solved the given problem in-contest
    pub fn has_solved(&self, problem_id: Uuid) -> bool {
        self.solved_problems
            .iter()
            .any(|s| s.problem_id == problem_id)
    }
}

/// Contest record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contest {
    pub id: Uuid,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub problems: Vec<ContestProblem>,
    pub participants: Vec<Participant>,
}

impl Contest {
    /// Create a contest over the given window
    pub fn new(title: &str, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            start_time,
            end_time,
            problems: Vec::new(),
            participants: Vec::new(),
        }
    }

    /// Get current status of the contest
    pub fn status(&self) -> ContestStatus {
        self.status_at(Utc::now())
    }

    /// Status at an arbitrary instant
    pub fn status_at(&self, now: DateTime<Utc>) -> ContestStatus {
        if now < self.start_time {
            ContestStatus::Upcoming
        } else if now < self.end_time {
            ContestStatus::Ongoing
        } else {
            ContestStatus::Ended
        }
    }

    /// Configured point value for a contest problem, if the problem is listed
    pub fn problem_points(&self, problem_id: Uuid) -> Option<u32> {
        self.problems
            .iter()
            .find(|p| p.problem_id == problem_id)
            .and_then(|p| p.points)
    }

    /// Find a participant's scorecard
    pub fn participant(&self, user_id: Uuid) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }

    /// Participants in leaderboard order: descending score, then ascending
    /// penalty, then earliest last submission (participants with no
    /// submissions rank after those with one at equal score and penalty)
    pub fn leaderboard(&self) -> Vec<&Participant> {
        let mut ranked: Vec<&Participant> = self.participants.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.penalty.cmp(&b.penalty))
                .then_with(|| match (a.last_submission_at, b.last_submission_at) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                })
        });
        ranked
    }
}
