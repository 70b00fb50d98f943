//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::roles;

/// Aggregate solving statistics for a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    pub total_solved: u32,
    pub easy_solved: u32,
    pub medium_solved: u32,
    pub hard_solved: u32,
    pub total_submissions: u64,
    pub accepted_submissions: u64,
    pub total_points: u64,
    pub streak: u32,
    pub max_streak: u32,
    pub last_active_date: Option<DateTime<Utc>>,
}

/// Record of a solved problem; at most one per problem per user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolvedProblem {
    pub problem_id: Uuid,
    /// Language of the first accepted submission
    pub language: String,
    pub best_runtime_ms: f64,
    pub best_memory_kb: u64,
    pub solved_at: DateTime<Utc>,
}

/// User record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    pub stats: UserStats,
    pub solved_problems: Vec<SolvedProblem>,
}

impl User {
    /// Create a new user with empty stats
    pub fn new(username: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            role: roles::USER.to_string(),
            stats: UserStats::default(),
            solved_problems: Vec::new(),
        }
    }

    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }

    /// Check whether the user has already solved the given problem
    pub fn has_solved(&self, problem_id: Uuid) -> bool {
        self.solved_problems
            .iter()
            .any(|s| s.problem_id == problem_id)
    }
}
