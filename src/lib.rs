pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod analytics;
pub mod storage;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use analytics::AnalyticsPipeline;
pub use storage::JsonStore;
