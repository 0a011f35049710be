mod file_config;

pub use file_config::{FileConfig, ViewDefaultsConfig};

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub dataset_path: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    pub view_defaults: ViewDefaults,
}

/// Values used for view options a request leaves out.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDefaults {
    pub top_k: usize,
    pub genre_min_count: usize,
    pub year_min_count: usize,
    pub top_min_count_a: usize,
    pub top_min_count_b: usize,
    pub top_limit: usize,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            top_k: 15,
            genre_min_count: 50,
            year_min_count: 50,
            top_min_count_a: 50,
            top_min_count_b: 150,
            top_limit: 5,
        }
    }
}

impl ViewDefaults {
    fn merge(file: ViewDefaultsConfig) -> Self {
        let base = Self::default();
        Self {
            top_k: file.top_k.unwrap_or(base.top_k),
            genre_min_count: file.genre_min_count.unwrap_or(base.genre_min_count),
            year_min_count: file.year_min_count.unwrap_or(base.year_min_count),
            top_min_count_a: file.top_min_count_a.unwrap_or(base.top_min_count_a),
            top_min_count_b: file.top_min_count_b.unwrap_or(base.top_min_count_b),
            top_limit: file.top_limit.unwrap_or(base.top_limit),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let dataset_path = file
            .dataset_path
            .map(PathBuf::from)
            .or_else(|| cli.dataset_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("dataset_path must be specified as argument or in config file")
            })?;

        if !dataset_path.exists() {
            bail!("Dataset file does not exist: {:?}", dataset_path);
        }
        if !dataset_path.is_file() {
            bail!("dataset_path is not a file: {:?}", dataset_path);
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let content_cache_age_sec = file
            .content_cache_age_sec
            .unwrap_or(cli.content_cache_age_sec);
        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let view_defaults = ViewDefaults::merge(file.defaults.unwrap_or_default());

        Ok(Self {
            dataset_path,
            port,
            logging_level,
            content_cache_age_sec,
            frontend_dir_path,
            view_defaults,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
