use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ratings_explorer::config::{AppConfig, CliConfig, FileConfig};
use ratings_explorer::dataset::{load_dataset, Dataset};
use ratings_explorer::server::{run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the ratings CSV file, one row per rating joined with its movie.
    #[clap(value_parser = parse_path)]
    pub dataset_path: Option<PathBuf>,

    /// Path to a TOML config file, its values override the arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// The maximum age of the views in the HTTP cache in seconds.
    #[clap(long, default_value_t = 3600)]
    pub content_cache_age_sec: usize,

    /// Path to a frontend directory to be statically served instead of the
    /// embedded dashboard.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Only load the dataset and report what was found.
    #[clap(long)]
    pub check_only: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            dataset_path: self.dataset_path.clone(),
            port: self.port,
            logging_level: self.logging_level.clone(),
            content_cache_age_sec: self.content_cache_age_sec,
            frontend_dir_path: self.frontend_dir_path.clone(),
        }
    }
}

fn check_dataset(config: &AppConfig) -> Result<()> {
    let build_result = Dataset::build(&config.dataset_path);
    let (dataset, problems) = match build_result {
        Ok(result) => (Some(result.dataset), result.problems),
        Err(err) => {
            println!("Fatal: {}", err);
            (None, vec![])
        }
    };

    if !problems.is_empty() {
        println!("Found {} problems:", problems.len());
        for problem in problems.iter() {
            println!("- {}", problem);
        }
        println!();
    }

    match (&dataset, problems.is_empty()) {
        (Some(_), true) => println!("Dataset checked, no issues found."),
        (Some(_), false) => println!("Dataset was built, but check the issues above."),
        (None, _) => println!("Check the problems above, the dataset could not be loaded."),
    }
    match dataset {
        Some(dataset) => {
            println!(
                "Dataset has:\n{} movies\n{} ratings\n{} users\n{} genres",
                dataset.get_movies_count(),
                dataset.get_ratings_count(),
                dataset.get_users_count(),
                dataset.get_genres().len()
            );
            Ok(())
        }
        None => anyhow::bail!("Dataset check failed"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    if cli_args.check_only {
        return check_dataset(&config);
    }

    let dataset = Arc::new(load_dataset(&config.dataset_path)?);
    if dataset.is_empty() {
        info!("Dataset is empty, every view will be empty too.");
    }

    let server_config = ServerConfig {
        requests_logging_level: config.logging_level,
        port: config.port,
        content_cache_age_sec: config.content_cache_age_sec,
        frontend_dir_path: config.frontend_dir_path,
        view_defaults: config.view_defaults,
    };

    info!("Ready to serve at port {}!", server_config.port);
    run_server(server_config, dataset).await
}
