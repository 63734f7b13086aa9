use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::analytics::round1;
use crate::models::{
    AnalyticsReport, GitHubUser, HireabilityBreakdown, PrStats, RepoHealth, RepoStats, UserSummary,
};

/// Everything the reducers derived from one run, bundled for assembly.
#[derive(Debug, Clone)]
pub struct DerivedMetrics {
    pub languages: BTreeMap<String, u64>,
    pub commit_hours: BTreeMap<u32, u64>,
    pub commit_days: BTreeMap<String, u64>,
    pub activity_types: BTreeMap<String, u64>,
    pub repo_stats: RepoStats,
    pub monthly_commits: BTreeMap<String, u64>,
    pub pr_stats: PrStats,
    pub repo_health: RepoHealth,
}

/// Merge the profile and reducer outputs into the final report. `now` is
/// the same instant the monthly trend was computed against, so the
/// document's timestamp and its trailing months agree.
pub fn compose(user: &GitHubUser, metrics: DerivedMetrics, now: DateTime<Utc>) -> AnalyticsReport {
    let monthly_commits_avg = trend_average(&metrics.monthly_commits);

    let hireability_breakdown = HireabilityBreakdown {
        public_repos: user.public_repos,
        stars: metrics.repo_stats.total_stars,
        followers: user.followers,
        consistency: monthly_commits_avg,
        // merge_rate null reads as zero collaboration here; the pr_stats
        // section keeps the null so the dashboard can tell them apart.
        collaboration: round1(metrics.pr_stats.merge_rate.unwrap_or(0.0) * 100.0),
    };

    AnalyticsReport {
        user: UserSummary {
            username: user.login.clone(),
            name: user.name.clone(),
            bio: user.bio.clone(),
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
            created_at: user.created_at,
        },
        languages: metrics.languages,
        commit_hours: metrics.commit_hours,
        commit_days: metrics.commit_days,
        activity_types: metrics.activity_types,
        repo_stats: metrics.repo_stats,
        monthly_commits: metrics.monthly_commits,
        monthly_commits_avg,
        pr_stats: metrics.pr_stats,
        repo_health: metrics.repo_health,
        hireability_breakdown,
        last_updated: now,
    }
}

fn trend_average(trend: &BTreeMap<String, u64>) -> f64 {
    if trend.is_empty() {
        return 0.0;
    }
    round1(trend.values().sum::<u64>() as f64 / trend.len() as f64)
}
