use super::{Movie, MovieId, Rating, UserId};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const COLUMN_USER_ID: &str = "user_id";
const COLUMN_MOVIE_ID: &str = "movie_id";
const COLUMN_RATING: &str = "rating";
const COLUMN_TITLE: &str = "title";
const COLUMN_GENRES: &str = "genres";
const COLUMN_YEAR: &str = "year";
const COLUMN_TIMESTAMP: &str = "timestamp";
const COLUMN_RATING_YEAR: &str = "rating_year";

/// Fatal errors, the dataset cannot be used.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset file {0} does not exist.")]
    NotFound(PathBuf),

    #[error("Could not read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column \"{0}\" is missing from the header.")]
    MissingColumn(&'static str),

    #[error("Line {line}: could not parse {column} value \"{value}\".")]
    MalformedField {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Line {line}: rating {value} is outside of the rating scale.")]
    RatingOutOfScale { line: u64, value: f64 },

    #[error("Rating of user {user_id} references unknown movie {movie_id}.")]
    UnknownMovie { user_id: UserId, movie_id: MovieId },
}

/// Non-fatal issues found while building the dataset.
#[derive(Debug, Error, PartialEq)]
pub enum Problem {
    #[error("Line {line}: movie {movie_id} metadata differs from its first occurrence, keeping the first one.")]
    ConflictingMovie { movie_id: MovieId, line: u64 },

    #[error("Line {line}: timestamp \"{value}\" is not a number, the rating is kept without it.")]
    UnparsableTimestamp { line: u64, value: String },
}

#[derive(Debug)]
pub struct DatasetBuildResult {
    pub dataset: Dataset,
    pub problems: Vec<Problem>,
}

/// The ratings joined with their movies, loaded once and never mutated.
#[derive(Debug)]
pub struct Dataset {
    source: Option<PathBuf>,
    movies: HashMap<MovieId, Movie>,
    ratings: Vec<Rating>,
}

struct Columns {
    user_id: usize,
    movie_id: usize,
    rating: usize,
    title: usize,
    genres: Option<usize>,
    year: Option<usize>,
    timestamp: Option<usize>,
    rating_year: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Columns, DatasetError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require =
            |name: &'static str| find(name).ok_or(DatasetError::MissingColumn(name));

        Ok(Columns {
            user_id: require(COLUMN_USER_ID)?,
            movie_id: require(COLUMN_MOVIE_ID)?,
            rating: require(COLUMN_RATING)?,
            title: require(COLUMN_TITLE)?,
            genres: find(COLUMN_GENRES),
            year: find(COLUMN_YEAR),
            timestamp: find(COLUMN_TIMESTAMP),
            rating_year: find(COLUMN_RATING_YEAR),
        })
    }
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn field<'r>(record: &'r StringRecord, index: Option<usize>) -> &'r str {
    index.and_then(|i| record.get(i)).unwrap_or("")
}

fn parse_field<T: std::str::FromStr>(
    record: &StringRecord,
    index: usize,
    column: &'static str,
) -> Result<T, DatasetError> {
    let raw = field(record, Some(index));
    raw.parse().map_err(|_| DatasetError::MalformedField {
        line: record_line(record),
        column,
        value: raw.to_owned(),
    })
}

/// Whole numbers exported by dataframe tools sometimes come as floats
/// ("1995.0", "964982703.0").
fn parse_whole_number(raw: &str) -> Option<i64> {
    if let Ok(number) = raw.parse::<i64>() {
        return Some(number);
    }
    match raw.parse::<f64>() {
        Ok(number) if number.fract() == 0.0 && number.abs() < i64::MAX as f64 => {
            Some(number as i64)
        }
        _ => None,
    }
}

fn parse_year(
    record: &StringRecord,
    index: Option<usize>,
    column: &'static str,
) -> Result<Option<i32>, DatasetError> {
    let raw = field(record, index);
    if raw.is_empty() {
        return Ok(None);
    }
    parse_whole_number(raw)
        .and_then(|year| i32::try_from(year).ok())
        .map(Some)
        .ok_or_else(|| DatasetError::MalformedField {
            line: record_line(record),
            column,
            value: raw.to_owned(),
        })
}

/// Unparsable timestamps are dropped rather than failing the load.
fn parse_timestamp(record: &StringRecord, index: Option<usize>) -> Result<Option<i64>, Problem> {
    let raw = field(record, index);
    if raw.is_empty() {
        return Ok(None);
    }
    parse_whole_number(raw)
        .map(Some)
        .ok_or_else(|| Problem::UnparsableTimestamp {
            line: record_line(record),
            value: raw.to_owned(),
        })
}

impl Dataset {
    /// Reads the joined ratings file at `path`.
    pub fn build(path: &Path) -> Result<DatasetBuildResult, DatasetError> {
        if !path.is_file() {
            return Err(DatasetError::NotFound(path.to_owned()));
        }
        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        let mut result = Dataset::from_reader(file)?;
        result.dataset.source = Some(path.to_owned());
        Ok(result)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<DatasetBuildResult, DatasetError> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let columns = Columns::from_headers(reader.headers()?)?;

        let mut movies: HashMap<MovieId, Movie> = HashMap::new();
        let mut ratings = Vec::new();
        let mut problems = Vec::new();

        for record_result in reader.records() {
            let record = record_result?;
            let line = record_line(&record);

            let value: f64 = parse_field(&record, columns.rating, COLUMN_RATING)?;
            if !Rating::is_in_scale(value) {
                return Err(DatasetError::RatingOutOfScale { line, value });
            }

            let movie = Movie {
                id: parse_field(&record, columns.movie_id, COLUMN_MOVIE_ID)?,
                title: field(&record, Some(columns.title)).to_owned(),
                release_year: parse_year(&record, columns.year, COLUMN_YEAR)?,
                genres: Movie::parse_genres(field(&record, columns.genres)),
            };
            let timestamp = parse_timestamp(&record, columns.timestamp).unwrap_or_else(|problem| {
                problems.push(problem);
                None
            });
            let rating = Rating {
                user_id: parse_field(&record, columns.user_id, COLUMN_USER_ID)?,
                movie_id: movie.id,
                value,
                timestamp,
                rated_year: parse_year(&record, columns.rating_year, COLUMN_RATING_YEAR)?,
            };

            match movies.get(&movie.id) {
                Some(existing) if *existing != movie => {
                    problems.push(Problem::ConflictingMovie {
                        movie_id: movie.id,
                        line,
                    });
                }
                Some(_) => {}
                None => {
                    movies.insert(movie.id, movie);
                }
            }
            ratings.push(rating);
        }

        Ok(DatasetBuildResult {
            dataset: Dataset {
                source: None,
                movies,
                ratings,
            },
            problems,
        })
    }

    /// Assembles a dataset from already parsed entities, every rating must
    /// reference one of `movies`.
    pub fn from_parts(movies: Vec<Movie>, ratings: Vec<Rating>) -> Result<Dataset, DatasetError> {
        let movies: HashMap<MovieId, Movie> = movies.into_iter().map(|m| (m.id, m)).collect();
        if let Some(orphan) = ratings.iter().find(|r| !movies.contains_key(&r.movie_id)) {
            return Err(DatasetError::UnknownMovie {
                user_id: orphan.user_id,
                movie_id: orphan.movie_id,
            });
        }
        Ok(Dataset {
            source: None,
            movies,
            ratings,
        })
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    pub fn get_movies_count(&self) -> usize {
        self.movies.len()
    }

    pub fn get_ratings_count(&self) -> usize {
        self.ratings.len()
    }

    pub fn get_users_count(&self) -> usize {
        self.ratings
            .iter()
            .map(|r| r.user_id)
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn iter_ratings(&self) -> impl Iterator<Item = &Rating> {
        self.ratings.iter()
    }

    /// Each rating paired with the movie it refers to.
    pub fn iter_joined(&self) -> impl Iterator<Item = (&Rating, &Movie)> {
        self.ratings
            .iter()
            .filter_map(|r| self.movies.get(&r.movie_id).map(|m| (r, m)))
    }

    /// The joined records exploded by genre: one item per (rating, genre).
    pub fn iter_genre_rows(&self) -> impl Iterator<Item = (&str, &Rating)> {
        self.iter_joined()
            .flat_map(|(r, m)| m.genres.iter().map(move |g| (g.as_str(), r)))
    }

    pub fn get_genres(&self) -> BTreeSet<&str> {
        self.movies
            .values()
            .flat_map(|m| m.genres.iter().map(String::as_str))
            .collect()
    }

    /// First and last release year among rated movies.
    pub fn release_year_span(&self) -> Option<(i32, i32)> {
        span(self.iter_joined().filter_map(|(_, m)| m.release_year))
    }

    /// First and last year in which a rating was given.
    pub fn rating_year_span(&self) -> Option<(i32, i32)> {
        span(self.ratings.iter().filter_map(Rating::rating_year))
    }
}

fn span(years: impl Iterator<Item = i32>) -> Option<(i32, i32)> {
    years.fold(None, |acc, year| match acc {
        None => Some((year, year)),
        Some((lo, hi)) => Some((lo.min(year), hi.max(year))),
    })
}
