//! Test fixture creation for the ratings dataset

use super::constants::*;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One line of the joined ratings CSV.
pub struct FixtureRow {
    pub user_id: u32,
    pub movie_id: u32,
    pub rating: f64,
    pub timestamp: i64,
    pub title: String,
    pub genres: String,
    pub year: Option<i32>,
}

pub fn write_dataset_csv(path: &Path, rows: &[FixtureRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "user_id",
        "movie_id",
        "rating",
        "timestamp",
        "title",
        "genres",
        "year",
    ])?;
    for row in rows {
        writer.write_record([
            row.user_id.to_string(),
            row.movie_id.to_string(),
            row.rating.to_string(),
            row.timestamp.to_string(),
            row.title.clone(),
            row.genres.clone(),
            row.year.map(|y| y.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

struct FixtureMovie {
    id: u32,
    title: &'static str,
    genres: &'static str,
    year: Option<i32>,
    ratings: usize,
    values: [f64; 2],
    timestamp: i64,
}

const FIXTURE_MOVIES: [FixtureMovie; 5] = [
    FixtureMovie {
        id: HEAT_ID,
        title: HEAT_TITLE,
        genres: "Action|Crime|Thriller",
        year: Some(1995),
        ratings: HEAT_RATINGS,
        values: [4.0, 5.0],
        timestamp: BASE_TIMESTAMP,
    },
    FixtureMovie {
        id: AMELIE_ID,
        title: AMELIE_TITLE,
        genres: "Comedy|Romance",
        year: Some(2001),
        ratings: AMELIE_RATINGS,
        values: [3.5, 4.5],
        timestamp: BASE_TIMESTAMP,
    },
    FixtureMovie {
        id: JUMANJI_ID,
        title: JUMANJI_TITLE,
        genres: "Adventure|Children|Fantasy",
        year: Some(1995),
        ratings: JUMANJI_RATINGS,
        values: [3.0, 4.0],
        timestamp: BASE_TIMESTAMP,
    },
    FixtureMovie {
        id: SABRINA_ID,
        title: SABRINA_TITLE,
        genres: "Comedy|Romance",
        year: Some(1954),
        ratings: SABRINA_RATINGS,
        values: [5.0, 5.0],
        timestamp: SABRINA_TIMESTAMP,
    },
    FixtureMovie {
        id: UNDATED_ID,
        title: "Untitled",
        genres: "unknown",
        year: None,
        ratings: UNDATED_RATINGS,
        values: [2.0, 2.0],
        timestamp: BASE_TIMESTAMP,
    },
];

fn fixture_rows() -> Vec<FixtureRow> {
    let mut rows = Vec::with_capacity(TOTAL_RATINGS);
    for movie in FIXTURE_MOVIES.iter() {
        for i in 0..movie.ratings {
            rows.push(FixtureRow {
                user_id: i as u32 + 1,
                movie_id: movie.id,
                rating: movie.values[i % 2],
                timestamp: movie.timestamp + i as i64,
                title: movie.title.to_owned(),
                genres: movie.genres.to_owned(),
                year: movie.year,
            });
        }
    }
    rows
}

/// Creates a temporary ratings CSV with the movies described in `constants`.
/// Returns (temp_dir, csv_path)
pub fn create_test_dataset() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("ratings.csv");
    write_dataset_csv(&path, &fixture_rows())?;
    Ok((dir, path))
}
