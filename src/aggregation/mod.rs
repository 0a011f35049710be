//! The four analytical views computed over the in-memory dataset.
//!
//! Every call recomputes from scratch, nothing is cached between calls.

mod genres;
mod movies;
mod stats;
mod years;

pub use genres::{
    genre_popularity, genre_satisfaction, popularity_view, practical_max_min_count,
    satisfaction_view, GenreCount, GenreSatisfaction, PopularityOptions, PopularityView,
    SatisfactionOptions, SatisfactionView, OTHER_GENRE,
};
pub use movies::{
    top_movies, top_movies_view, MovieStat, TopMoviesList, TopMoviesOptions, TopMoviesView,
};
pub use years::{
    release_year_trend, trend_view, TrendOptions, TrendPoint, TrendView, YearStat,
    MAX_SMOOTHING_WINDOW,
};

use crate::dataset::Dataset;
use thiserror::Error;

/// Rejected view options.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Smoothing window must be between 1 and {max}, got {0}.", max = MAX_SMOOTHING_WINDOW)]
    InvalidWindow(usize),

    #[error("Year range start {from} is after its end {to}.")]
    InvalidYearRange { from: i32, to: i32 },
}

/// Borrowing facade over a dataset exposing the raw aggregations.
#[derive(Clone, Copy)]
pub struct AggregationEngine<'a> {
    dataset: &'a Dataset,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        AggregationEngine { dataset }
    }

    pub fn genre_popularity(&self) -> Vec<GenreCount> {
        genre_popularity(self.dataset)
    }

    pub fn genre_satisfaction(&self) -> Vec<GenreSatisfaction> {
        genre_satisfaction(self.dataset)
    }

    pub fn release_year_trend(&self) -> Vec<YearStat> {
        release_year_trend(self.dataset)
    }

    pub fn top_movies(&self, min_count: usize) -> Vec<MovieStat> {
        top_movies(self.dataset, min_count)
    }

    pub fn popularity_view(&self, options: &PopularityOptions) -> PopularityView {
        popularity_view(self.dataset, options)
    }

    pub fn satisfaction_view(&self, options: &SatisfactionOptions) -> SatisfactionView {
        satisfaction_view(self.dataset, options)
    }

    pub fn trend_view(&self, options: &TrendOptions) -> Result<TrendView, ViewError> {
        trend_view(self.dataset, options)
    }

    pub fn top_movies_view(&self, options: &TopMoviesOptions) -> TopMoviesView {
        top_movies_view(self.dataset, options)
    }
}
