pub mod client;
pub mod paginator;

pub use client::{GitHubClient, HealthSignals};
pub use paginator::Paginator;
