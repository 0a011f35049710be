use super::stats::RunningStats;
use crate::dataset::{Dataset, MovieId};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct MovieStat {
    pub movie_id: MovieId,
    pub title: String,
    pub mean_rating: f64,
    pub count: usize,
}

/// Movies with at least `min_count` ratings, best mean first. Ties go to
/// the most rated movie, then to the lowest id.
pub fn top_movies(dataset: &Dataset, min_count: usize) -> Vec<MovieStat> {
    let mut groups: HashMap<MovieId, RunningStats> = HashMap::new();
    for rating in dataset.iter_ratings() {
        groups.entry(rating.movie_id).or_default().push(rating.value);
    }

    let mut out: Vec<MovieStat> = groups
        .into_iter()
        .filter(|(_, stats)| stats.count() >= min_count)
        .filter_map(|(movie_id, stats)| {
            dataset.get_movie(movie_id).map(|movie| MovieStat {
                movie_id,
                title: movie.title.clone(),
                mean_rating: stats.mean(),
                count: stats.count(),
            })
        })
        .collect();
    out.sort_by(|a, b| {
        b.mean_rating
            .total_cmp(&a.mean_rating)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.movie_id.cmp(&b.movie_id))
    });
    out
}

#[derive(Clone, Debug)]
pub struct TopMoviesOptions {
    pub min_count_a: usize,
    pub min_count_b: usize,
    pub limit: usize,
}

#[derive(Serialize, Debug)]
pub struct TopMoviesList {
    pub min_count: usize,
    /// Movies passing the threshold before `limit` was applied.
    pub eligible: usize,
    pub movies: Vec<MovieStat>,
}

#[derive(Serialize, Debug)]
pub struct TopMoviesView {
    pub list_a: TopMoviesList,
    pub list_b: TopMoviesList,
}

fn top_movies_list(dataset: &Dataset, min_count: usize, limit: usize) -> TopMoviesList {
    let mut movies = top_movies(dataset, min_count);
    let eligible = movies.len();
    movies.truncate(limit);
    TopMoviesList {
        min_count,
        eligible,
        movies,
    }
}

pub fn top_movies_view(dataset: &Dataset, options: &TopMoviesOptions) -> TopMoviesView {
    TopMoviesView {
        list_a: top_movies_list(dataset, options.min_count_a, options.limit),
        list_b: top_movies_list(dataset, options.min_count_b, options.limit),
    }
}
