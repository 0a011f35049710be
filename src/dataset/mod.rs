mod dataset;
mod load;
mod movie;
mod rating;

pub use dataset::{Dataset, DatasetBuildResult, DatasetError, Problem as LoadDatasetProblem};
pub use load::load_dataset;
pub use movie::{Movie, MovieId};
pub use rating::{Rating, UserId, MAX_RATING, MIN_RATING};
