use serde::Serialize;

pub type MovieId = u32;

pub const GENRES_SEPARATOR: char = '|';

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub release_year: Option<i32>,
    pub genres: Vec<String>,
}

impl Movie {
    /// Splits a `|`-separated genres cell into labels.
    ///
    /// Labels are trimmed, empty ones are dropped and repeated ones are kept
    /// once, in order of first appearance.
    pub fn parse_genres(raw: &str) -> Vec<String> {
        let mut genres: Vec<String> = Vec::new();
        for label in raw.split(GENRES_SEPARATOR).map(str::trim) {
            if label.is_empty() || genres.iter().any(|g| g == label) {
                continue;
            }
            genres.push(label.to_owned());
        }
        genres
    }
}
