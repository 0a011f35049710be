use super::Dataset;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Builds the dataset at `path`, logging non-fatal problems along the way.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    info!("Loading dataset at {}...", path.display());

    let build_result = Dataset::build(path)
        .with_context(|| format!("Could not load dataset {}", path.display()))?;
    let problems = build_result.problems;
    let dataset = build_result.dataset;

    if problems.is_empty() {
        info!("Dataset checked, no issues found.");
    } else {
        warn!("Found {} problems:", problems.len());
        for problem in problems.iter() {
            warn!("- {}", problem);
        }
        warn!(
            "Dataset was built, but check the {} non-fatal issues above.",
            problems.len()
        );
    }

    info!(
        "Dataset has:\n{} movies\n{} ratings\n{} users",
        dataset.get_movies_count(),
        dataset.get_ratings_count(),
        dataset.get_users_count()
    );
    Ok(dataset)
}
