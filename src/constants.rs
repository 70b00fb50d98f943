//! Application-wide constants
//!
//! This module contains all constant values used throughout the judging core.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// JUDGING DEFAULTS
// =============================================================================

/// Default per-problem time limit in milliseconds
pub const DEFAULT_TIME_LIMIT_MS: u64 = 2000;

/// Default per-problem memory limit in megabytes
pub const DEFAULT_MEMORY_LIMIT_MB: u64 = 256;

/// Maximum time limit in milliseconds (to prevent abuse)
pub const MAX_TIME_LIMIT_MS: u64 = 30_000;

/// Maximum memory limit in megabytes
pub const MAX_MEMORY_LIMIT_MB: u64 = 1024;

/// Number of sample test cases used for a "run" request (not a scored submit)
pub const SAMPLE_RUN_CASE_LIMIT: usize = 3;

// =============================================================================
// EXECUTION BACKEND DEFAULTS
// =============================================================================

/// Default base URL of the external execution backend
pub const DEFAULT_EXECUTION_BASE_URL: &str = "https://ce.judge0.com";

/// Default HTTP request timeout against the execution backend, in seconds
pub const DEFAULT_EXECUTION_TIMEOUT_SECS: u64 = 15;

/// Default interval between polling rounds, in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1500;

/// Default maximum number of polling rounds before unresolved test cases
/// are forced to a terminal verdict
pub const DEFAULT_MAX_POLL_ROUNDS: u32 = 20;

// =============================================================================
// WORKER POOL DEFAULTS
// =============================================================================

/// Default number of concurrent judging workers
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Default capacity of the judging queue (bounded for backpressure)
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers and their execution backend ids
pub mod languages {
    pub const C: &str = "c";
    pub const CPP: &str = "cpp";
    pub const JAVA: &str = "java";
    pub const PYTHON3: &str = "python3";
    pub const JAVASCRIPT: &str = "javascript";
    pub const GO: &str = "go";
    pub const RUST: &str = "rust";
    pub const TYPESCRIPT: &str = "typescript";
    pub const CSHARP: &str = "csharp";
    pub const RUBY: &str = "ruby";

    /// All supported language identifiers
    pub const ALL: &[&str] = &[
        C, CPP, JAVA, PYTHON3, JAVASCRIPT, GO, RUST, TYPESCRIPT, CSHARP, RUBY,
    ];

    /// Map a language key to the execution backend's numeric language id
    pub fn backend_id(key: &str) -> Option<u32> {
        match key {
            C => Some(50),
            CPP => Some(54),
            JAVA => Some(62),
            PYTHON3 => Some(71),
            JAVASCRIPT => Some(63),
            GO => Some(60),
            RUST => Some(73),
            TYPESCRIPT => Some(74),
            CSHARP => Some(51),
            RUBY => Some(72),
            _ => None,
        }
    }
}

// =============================================================================
// SCORING
// =============================================================================

/// Points awarded per problem difficulty
pub mod difficulty_points {
    pub const EASY: u32 = 10;
    pub const MEDIUM: u32 = 25;
    pub const HARD: u32 = 50;
}

/// Points for a contest problem when the contest does not configure them
pub const DEFAULT_CONTEST_PROBLEM_POINTS: u32 = 100;

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const USER: &str = "user";
    pub const ADMIN: &str = "admin";
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: usize = 1024 * 1024;

/// Maximum ad-hoc custom input size in bytes
pub const MAX_CUSTOM_INPUT_SIZE: usize = 64 * 1024;
