use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;

use crate::analytics::composer::{compose, DerivedMetrics};
use crate::analytics::reducers;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::github::{GitHubClient, HealthSignals};
use crate::models::{AnalyticsReport, Repository};

pub struct AnalyticsPipeline {
    github: Arc<GitHubClient>,
    config: PipelineConfig,
}

impl AnalyticsPipeline {
    pub fn new(github: GitHubClient, config: PipelineConfig) -> Self {
        Self {
            github: Arc::new(github),
            config,
        }
    }

    /// Fetch the three collections, probe repository health, run the
    /// reducers, and compose the report. Only a missing profile is fatal;
    /// everything downstream degrades to partial data.
    pub async fn run(&self, username: &str) -> Result<AnalyticsReport> {
        tracing::info!("Fetching GitHub profile for: {}", username);
        let user = self.github.get_user(username).await?;

        let repos = self.github.get_user_repos(username).await;
        tracing::info!("Found {} repositories", repos.len());

        let events = self
            .github
            .get_user_events(username, self.config.max_event_pages)
            .await;
        tracing::info!("Fetched {} events", events.len());

        let signals = self.fetch_health_signals(&repos).await;

        tracing::info!("Reducing collections...");
        let now = Utc::now();
        let (commit_hours, commit_days) = reducers::commit_time_histogram(&events);
        let metrics = DerivedMetrics {
            languages: reducers::language_distribution(&repos),
            commit_hours,
            commit_days,
            activity_types: reducers::activity_type_histogram(&events),
            repo_stats: reducers::repo_popularity(&repos),
            monthly_commits: reducers::monthly_commit_trend(&events, self.config.trend_months, now),
            pr_stats: reducers::pr_merge_stats(&events),
            repo_health: reducers::repo_health_counts(&repos, &signals),
        };

        Ok(compose(&user, metrics, now))
    }

    /// Bounded fan-out of the health probes, one task per repository so
    /// all three probes for a repository land together. A task that cannot
    /// run contributes all-absent signals instead of failing the run.
    async fn fetch_health_signals(&self, repos: &[Repository]) -> Vec<HealthSignals> {
        if repos.is_empty() {
            return Vec::new();
        }

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit));

        let pb = ProgressBar::new(repos.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos")
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut probe_futures = Vec::new();

        for repo in repos {
            let github = self.github.clone();
            let sem = semaphore.clone();
            let owner = repo.owner.login.clone();
            let name = repo.name.clone();
            let pb_clone = pb.clone();

            probe_futures.push(async move {
                let signals = match sem.acquire().await {
                    Ok(_permit) => github.get_repo_health_signals(&owner, &name).await,
                    Err(_) => HealthSignals::default(),
                };
                pb_clone.inc(1);
                signals
            });
        }

        let results = join_all(probe_futures).await;
        pb.finish_with_message("Probed repository health");

        results
    }
}
