//! Ratings Explorer library
//!
//! Loads a MovieLens-style ratings table into memory and serves four
//! aggregated views of it over HTTP.

pub mod aggregation;
pub mod config;
pub mod dataset;
pub mod server;

pub use aggregation::AggregationEngine;
pub use dataset::{load_dataset, Dataset};
pub use server::{run_server, RequestsLoggingLevel, ServerConfig};
