use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_OUTPUT_PATH: &str = "data/analytics.json";
pub const DEFAULT_MAX_EVENT_PAGES: u32 = 3;
pub const DEFAULT_TREND_MONTHS: u32 = 12;
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub output_path: String,
    pub max_event_pages: u32,
    pub trend_months: u32,
    pub concurrency_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Unauthenticated runs are allowed, just rate limited harder.
        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        let output_path =
            env::var("OUTPUT_PATH").unwrap_or_else(|_| DEFAULT_OUTPUT_PATH.to_string());

        let max_event_pages = parse_env("MAX_EVENT_PAGES", DEFAULT_MAX_EVENT_PAGES)?;
        let trend_months = parse_env("TREND_MONTHS", DEFAULT_TREND_MONTHS)?;
        let concurrency_limit = parse_env("CONCURRENCY_LIMIT", DEFAULT_CONCURRENCY_LIMIT)?;

        Ok(Self {
            github_token,
            output_path,
            max_event_pages,
            trend_months,
            concurrency_limit,
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| Error::Config(format!("{} must be a positive integer, got {:?}", name, value))),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub max_event_pages: u32,
    pub trend_months: u32,
    pub concurrency_limit: usize,
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_event_pages: config.max_event_pages,
            trend_months: config.trend_months,
            concurrency_limit: config.concurrency_limit,
        }
    }
}
