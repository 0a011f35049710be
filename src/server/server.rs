use anyhow::Result;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tracing::debug;

use super::{http_cache, log_requests, state::*, ServerConfig};
use crate::aggregation::{
    AggregationEngine, PopularityOptions, SatisfactionOptions, TopMoviesOptions, TrendOptions,
};

const DASHBOARD_PAGE: &str = include_str!("../../frontend/index.html");

#[derive(Serialize)]
struct DatasetSummary {
    pub source: Option<String>,
    pub movies: usize,
    pub ratings: usize,
    pub users: usize,
    pub genres: usize,
    pub release_years: Option<(i32, i32)>,
    pub rating_years: Option<(i32, i32)>,
    pub uptime: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug, Default)]
struct PopularityQuery {
    pub top_k: Option<usize>,
    pub include_other: Option<bool>,
    pub hide_unknown: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
struct SatisfactionQuery {
    pub min_count: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
struct TrendQuery {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub min_count: Option<usize>,
    pub window: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
struct TopMoviesQuery {
    pub min_count_a: Option<usize>,
    pub min_count_b: Option<usize>,
    pub limit: Option<usize>,
}

async fn home() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

async fn get_summary(State(state): State<ServerState>) -> impl IntoResponse {
    let dataset = &state.dataset;
    let summary = DatasetSummary {
        source: dataset.source().map(|p| p.display().to_string()),
        movies: dataset.get_movies_count(),
        ratings: dataset.get_ratings_count(),
        users: dataset.get_users_count(),
        genres: dataset.get_genres().len(),
        release_years: dataset.release_year_span(),
        rating_years: dataset.rating_year_span(),
        uptime: format_uptime(state.start_time.elapsed()),
    };
    Json(summary)
}

async fn get_genre_popularity(
    State(dataset): State<GuardedDataset>,
    State(config): State<ServerConfig>,
    Query(query): Query<PopularityQuery>,
) -> Response {
    let options = PopularityOptions {
        top_k: query.top_k.unwrap_or(config.view_defaults.top_k),
        include_other: query.include_other.unwrap_or(true),
        hide_unknown: query.hide_unknown.unwrap_or(true),
    };
    Json(AggregationEngine::new(&dataset).popularity_view(&options)).into_response()
}

async fn get_genre_satisfaction(
    State(dataset): State<GuardedDataset>,
    State(config): State<ServerConfig>,
    Query(query): Query<SatisfactionQuery>,
) -> Response {
    let options = SatisfactionOptions {
        min_count: query.min_count,
        default_min_count: config.view_defaults.genre_min_count,
    };
    Json(AggregationEngine::new(&dataset).satisfaction_view(&options)).into_response()
}

async fn get_release_year_trend(
    State(dataset): State<GuardedDataset>,
    State(config): State<ServerConfig>,
    Query(query): Query<TrendQuery>,
) -> Response {
    let options = TrendOptions {
        from: query.from,
        to: query.to,
        min_count: query.min_count.unwrap_or(config.view_defaults.year_min_count),
        window: query.window.unwrap_or(1),
    };
    match AggregationEngine::new(&dataset).trend_view(&options) {
        Ok(view) => Json(view).into_response(),
        Err(err) => {
            debug!("Rejected trend options {:?}: {}", options, err);
            (StatusCode::BAD_REQUEST, format!("{}", err)).into_response()
        }
    }
}

async fn get_top_movies(
    State(dataset): State<GuardedDataset>,
    State(config): State<ServerConfig>,
    Query(query): Query<TopMoviesQuery>,
) -> Response {
    let defaults = &config.view_defaults;
    let options = TopMoviesOptions {
        min_count_a: query.min_count_a.unwrap_or(defaults.top_min_count_a),
        min_count_b: query.min_count_b.unwrap_or(defaults.top_min_count_b),
        limit: query.limit.unwrap_or(defaults.top_limit),
    };
    Json(AggregationEngine::new(&dataset).top_movies_view(&options)).into_response()
}

pub fn make_app(config: ServerConfig, dataset: GuardedDataset) -> Router {
    let state = ServerState::new(config.clone(), dataset);

    let view_routes: Router = Router::new()
        .route("/summary", get(get_summary))
        .route("/genres/popularity", get(get_genre_popularity))
        .route("/genres/satisfaction", get(get_genre_satisfaction))
        .route("/years/trend", get(get_release_year_trend))
        .route("/movies/top", get(get_top_movies))
        .layer(middleware::from_fn_with_state(
            config.content_cache_age_sec,
            http_cache,
        ))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new().route("/", get(home)),
    };

    home_router
        .nest("/v1", view_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(config: ServerConfig, dataset: GuardedDataset) -> Result<()> {
    let port = config.port;
    let app = make_app(config, dataset);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
