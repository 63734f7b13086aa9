use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single output artifact of a run, shaped for the dashboard. Map
/// fields are BTreeMaps so the serialized document is deterministic:
/// hour keys sort numerically, month keys chronologically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub user: UserSummary,
    pub languages: BTreeMap<String, u64>,
    pub commit_hours: BTreeMap<u32, u64>,
    pub commit_days: BTreeMap<String, u64>,
    pub activity_types: BTreeMap<String, u64>,
    pub repo_stats: RepoStats,
    pub monthly_commits: BTreeMap<String, u64>,
    pub monthly_commits_avg: f64,
    pub pr_stats: PrStats,
    pub repo_health: RepoHealth,
    pub hireability_breakdown: HireabilityBreakdown,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoStats {
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_repos: usize,
    pub top_repos: Vec<TopRepo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopRepo {
    pub name: String,
    pub stars: u32,
    pub forks: u32,
    pub language: Option<String>,
}

/// `merge_rate` stays `None` when no pull-request events were seen, and
/// `avg_time_to_merge_hours` when no merged PR had parseable timestamps.
/// The dashboard distinguishes "no data" from an actual zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrStats {
    pub total_prs: u64,
    pub merged_prs: u64,
    pub merge_rate: Option<f64>,
    pub avg_time_to_merge_hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoHealth {
    pub has_readme: u32,
    pub has_ci: u32,
    pub has_tests: u32,
    pub has_license: u32,
    pub total_repos_checked: usize,
}

/// Display-ready scalar summary, not a validated score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HireabilityBreakdown {
    pub public_repos: u32,
    pub stars: u64,
    pub followers: u32,
    pub consistency: f64,
    pub collaboration: f64,
}
