//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per dashboard endpoint. When routes or
//! query parameters change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_home(&self) -> Response {
        self.get("/", &[]).await
    }

    pub async fn get_summary(&self) -> Response {
        self.get("/v1/summary", &[]).await
    }

    // ========================================================================
    // Views
    // ========================================================================

    pub async fn get_genre_popularity(&self, query: &[(&str, String)]) -> Response {
        self.get("/v1/genres/popularity", query).await
    }

    pub async fn get_genre_satisfaction(&self, query: &[(&str, String)]) -> Response {
        self.get("/v1/genres/satisfaction", query).await
    }

    pub async fn get_release_year_trend(&self, query: &[(&str, String)]) -> Response {
        self.get("/v1/years/trend", query).await
    }

    pub async fn get_top_movies(&self, query: &[(&str, String)]) -> Response {
        self.get("/v1/movies/top", query).await
    }
}
