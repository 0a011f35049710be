//! Shared constants for end-to-end tests
//!
//! When the fixture dataset changes, update only this file.

// ============================================================================
// Fixture movies
// ============================================================================

pub const HEAT_ID: u32 = 1;
pub const HEAT_TITLE: &str = "Heat";
/// Alternates 4.0 and 5.0, mean 4.5.
pub const HEAT_RATINGS: usize = 160;

pub const AMELIE_ID: u32 = 2;
/// Quoted in the CSV because of the comma.
pub const AMELIE_TITLE: &str = "Amelie, The Fabulous Destiny of";
/// Alternates 3.5 and 4.5, mean 4.0.
pub const AMELIE_RATINGS: usize = 60;

pub const JUMANJI_ID: u32 = 3;
pub const JUMANJI_TITLE: &str = "Jumanji";
/// Alternates 3.0 and 4.0, mean 3.5.
pub const JUMANJI_RATINGS: usize = 200;

pub const SABRINA_ID: u32 = 4;
pub const SABRINA_TITLE: &str = "Sabrina";
/// All 5.0.
pub const SABRINA_RATINGS: usize = 10;

/// No release year and only the "unknown" genre, all 2.0.
pub const UNDATED_ID: u32 = 5;
pub const UNDATED_RATINGS: usize = 3;

pub const TOTAL_MOVIES: usize = 5;
pub const TOTAL_RATINGS: usize =
    HEAT_RATINGS + AMELIE_RATINGS + JUMANJI_RATINGS + SABRINA_RATINGS + UNDATED_RATINGS;
/// User ids restart from 1 for every movie.
pub const TOTAL_USERS: usize = JUMANJI_RATINGS;
/// Including "unknown".
pub const TOTAL_GENRES: usize = 9;

/// 2001-09-09, used for every rating but Sabrina's.
pub const BASE_TIMESTAMP: i64 = 1_000_000_000;
/// 2008-01-10.
pub const SABRINA_TIMESTAMP: i64 = 1_200_000_000;

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// HTTP request timeout
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Interval between readiness checks
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
