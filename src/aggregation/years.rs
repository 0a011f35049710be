use super::stats::{centered_rolling_mean, RunningStats};
use super::ViewError;
use crate::dataset::Dataset;
use serde::Serialize;
use std::collections::BTreeMap;

pub const MAX_SMOOTHING_WINDOW: usize = 9;

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct YearStat {
    pub year: i32,
    pub count: usize,
    pub mean_rating: f64,
}

/// Count and mean rating per release year, ascending by year.
pub fn release_year_trend(dataset: &Dataset) -> Vec<YearStat> {
    let mut groups: BTreeMap<i32, RunningStats> = BTreeMap::new();
    for (rating, movie) in dataset.iter_joined() {
        if let Some(year) = movie.release_year {
            groups.entry(year).or_default().push(rating.value);
        }
    }
    groups
        .into_iter()
        .map(|(year, stats)| YearStat {
            year,
            count: stats.count(),
            mean_rating: stats.mean(),
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct TrendOptions {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub min_count: usize,
    pub window: usize,
}

impl TrendOptions {
    pub fn validate(&self) -> Result<(), ViewError> {
        if !(1..=MAX_SMOOTHING_WINDOW).contains(&self.window) {
            return Err(ViewError::InvalidWindow(self.window));
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(ViewError::InvalidYearRange { from, to });
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct TrendPoint {
    pub year: i32,
    pub count: usize,
    pub mean_rating: f64,
    /// Rolling mean of `mean_rating`, missing where the window does not fit.
    pub smoothed_mean_rating: Option<f64>,
}

#[derive(Serialize, Debug)]
pub struct TrendView {
    pub years: Vec<TrendPoint>,
    /// Release years available in the whole dataset, for range pickers.
    pub available_range: Option<(i32, i32)>,
    pub min_count: usize,
    pub window: usize,
}

pub fn trend_view(dataset: &Dataset, options: &TrendOptions) -> Result<TrendView, ViewError> {
    options.validate()?;

    let filtered: Vec<YearStat> = release_year_trend(dataset)
        .into_iter()
        .filter(|s| options.from.map_or(true, |from| s.year >= from))
        .filter(|s| options.to.map_or(true, |to| s.year <= to))
        .filter(|s| s.count >= options.min_count)
        .collect();

    let means: Vec<f64> = filtered.iter().map(|s| s.mean_rating).collect();
    let smoothed = centered_rolling_mean(&means, options.window);

    let years = filtered
        .into_iter()
        .zip(smoothed)
        .map(|(stat, smoothed_mean_rating)| TrendPoint {
            year: stat.year,
            count: stat.count,
            mean_rating: stat.mean_rating,
            smoothed_mean_rating,
        })
        .collect();

    Ok(TrendView {
        years,
        available_range: dataset.release_year_span(),
        min_count: options.min_count,
        window: options.window,
    })
}
