use super::stats::{quantile, RunningStats};
use crate::dataset::Dataset;
use serde::Serialize;
use std::collections::HashMap;

/// Label of the bucket that sums up the genres cut by `top_k`.
pub const OTHER_GENRE: &str = "Other";

const UNKNOWN_GENRE: &str = "unknown";

/// Ceiling of the suggested maximum for the per-genre minimum count.
const PRACTICAL_MAX_CAP: usize = 2000;
const PRACTICAL_MAX_FLOOR: usize = 50;
const PRACTICAL_MAX_QUANTILE: f64 = 0.95;

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct GenreSatisfaction {
    pub genre: String,
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

pub fn genre_popularity(dataset: &Dataset) -> Vec<GenreCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (genre, _) in dataset.iter_genre_rows() {
        *counts.entry(genre).or_insert(0) += 1;
    }

    let mut out: Vec<GenreCount> = counts
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre: genre.to_owned(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.genre.cmp(&b.genre)));
    out
}

pub fn genre_satisfaction(dataset: &Dataset) -> Vec<GenreSatisfaction> {
    let mut groups: HashMap<&str, RunningStats> = HashMap::new();
    for (genre, rating) in dataset.iter_genre_rows() {
        groups.entry(genre).or_default().push(rating.value);
    }

    let mut out: Vec<GenreSatisfaction> = groups
        .into_iter()
        .map(|(genre, stats)| GenreSatisfaction {
            genre: genre.to_owned(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
            count: stats.count(),
        })
        .collect();
    out.sort_by(|a, b| b.mean.total_cmp(&a.mean).then_with(|| a.genre.cmp(&b.genre)));
    out
}

#[derive(Clone, Debug)]
pub struct PopularityOptions {
    pub top_k: usize,
    pub include_other: bool,
    pub hide_unknown: bool,
}

#[derive(Serialize, Debug)]
pub struct PopularityView {
    /// Most rated genres, descending, with the `Other` bucket last when present.
    pub genres: Vec<GenreCount>,
    /// Distinct genres before `top_k` was applied.
    pub total_genres: usize,
    pub top_k: usize,
}

pub fn popularity_view(dataset: &Dataset, options: &PopularityOptions) -> PopularityView {
    let mut counts = genre_popularity(dataset);
    if options.hide_unknown {
        counts.retain(|c| !c.genre.eq_ignore_ascii_case(UNKNOWN_GENRE));
    }

    let total_genres = counts.len();
    let top_k = options.top_k.clamp(1, total_genres.max(1));

    let remainder: usize = counts.iter().skip(top_k).map(|c| c.count).sum();
    let has_remainder = counts.len() > top_k;
    counts.truncate(top_k);
    if options.include_other && has_remainder {
        counts.push(GenreCount {
            genre: OTHER_GENRE.to_owned(),
            count: remainder,
        });
    }

    PopularityView {
        genres: counts,
        total_genres,
        top_k,
    }
}

#[derive(Clone, Debug, Default)]
pub struct SatisfactionOptions {
    /// Genres with fewer ratings are excluded. `None` picks
    /// `default_min_count`, either way the threshold is capped at `practical_max`.
    pub min_count: Option<usize>,
    pub default_min_count: usize,
}

#[derive(Serialize, Debug)]
pub struct SatisfactionView {
    pub genres: Vec<GenreSatisfaction>,
    /// Genres under the threshold, ascending by count.
    pub excluded: Vec<GenreCount>,
    pub min_count: usize,
    /// Suggested upper bound for `min_count`, one that actually hides genres.
    pub practical_max: usize,
}

/// `min(2000, max(50, p95 of per-genre counts))`, 50 without genres.
pub fn practical_max_min_count(stats: &[GenreSatisfaction]) -> usize {
    let counts: Vec<f64> = stats.iter().map(|s| s.count as f64).collect();
    match quantile(&counts, PRACTICAL_MAX_QUANTILE) {
        Some(p95) => (p95 as usize).max(PRACTICAL_MAX_FLOOR).min(PRACTICAL_MAX_CAP),
        None => PRACTICAL_MAX_FLOOR,
    }
}

pub fn satisfaction_view(dataset: &Dataset, options: &SatisfactionOptions) -> SatisfactionView {
    let all = genre_satisfaction(dataset);
    let practical_max = practical_max_min_count(&all);
    let min_count = options
        .min_count
        .unwrap_or(options.default_min_count)
        .min(practical_max);

    let (genres, removed): (Vec<_>, Vec<_>) = all.into_iter().partition(|s| s.count >= min_count);
    let mut excluded: Vec<GenreCount> = removed
        .into_iter()
        .map(|s| GenreCount {
            genre: s.genre,
            count: s.count,
        })
        .collect();
    excluded.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.genre.cmp(&b.genre)));

    SatisfactionView {
        genres,
        excluded,
        min_count,
        practical_max,
    }
}
