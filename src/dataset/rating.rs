use super::MovieId;
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

pub type UserId = u32;

/// Lowest value of the rating scale.
pub const MIN_RATING: f64 = 0.5;

/// Highest value of the rating scale.
pub const MAX_RATING: f64 = 5.0;

#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub value: f64,
    /// Unix seconds, when the source row carries one.
    pub timestamp: Option<i64>,
    /// Year the source file already computed for the rating, if any.
    pub rated_year: Option<i32>,
}

impl Rating {
    pub fn is_in_scale(value: f64) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&value)
    }

    pub fn rated_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
    }

    /// The precomputed year when present, otherwise derived from the timestamp.
    pub fn rating_year(&self) -> Option<i32> {
        self.rated_year
            .or_else(|| self.rated_at().map(|date| date.year()))
    }
}
