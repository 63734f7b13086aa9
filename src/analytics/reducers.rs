//! Pure reducers from the fetched collections to derived metrics. Each one
//! owns its accumulator and observes nothing but its arguments, so they can
//! run in any order over the same collections.

use std::collections::BTreeMap;

use chrono::{DateTime, Months, Timelike, Utc};

use crate::analytics::round1;
use crate::github::HealthSignals;
use crate::models::{Event, PrStats, PullRequest, RepoHealth, RepoStats, Repository, TopRepo};

const PUSH_EVENT: &str = "PushEvent";
const PULL_REQUEST_EVENT: &str = "PullRequestEvent";
const TOP_REPOS: usize = 5;

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>().ok()
}

/// Repository count per primary language. Repositories without one are
/// excluded entirely, not bucketed as "unknown".
pub fn language_distribution(repos: &[Repository]) -> BTreeMap<String, u64> {
    let mut languages = BTreeMap::new();
    for repo in repos {
        if let Some(ref language) = repo.language {
            *languages.entry(language.clone()).or_insert(0) += 1;
        }
    }
    languages
}

/// Push events bucketed by UTC hour of day and by weekday name. Events
/// whose timestamp fails to parse are skipped here but still count in the
/// activity-type histogram.
pub fn commit_time_histogram(events: &[Event]) -> (BTreeMap<u32, u64>, BTreeMap<String, u64>) {
    let mut hours = BTreeMap::new();
    let mut days = BTreeMap::new();

    for event in events.iter().filter(|e| e.event_type == PUSH_EVENT) {
        let created_at = match parse_timestamp(&event.created_at) {
            Some(ts) => ts,
            None => continue,
        };
        *hours.entry(created_at.hour()).or_insert(0) += 1;
        *days.entry(created_at.format("%A").to_string()).or_insert(0) += 1;
    }

    (hours, days)
}

/// Event count per type tag, including types no other reducer looks at.
pub fn activity_type_histogram(events: &[Event]) -> BTreeMap<String, u64> {
    let mut activity_types = BTreeMap::new();
    for event in events {
        *activity_types.entry(event.event_type.clone()).or_insert(0) += 1;
    }
    activity_types
}

/// Star and fork totals plus the top 5 repositories by stars. The sort is
/// stable, so equal star counts keep the API's ordering.
pub fn repo_popularity(repos: &[Repository]) -> RepoStats {
    let total_stars = repos.iter().map(|r| r.stargazers_count as u64).sum();
    let total_forks = repos.iter().map(|r| r.forks_count as u64).sum();

    let mut ranked: Vec<&Repository> = repos.iter().collect();
    ranked.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));

    let top_repos = ranked
        .iter()
        .take(TOP_REPOS)
        .map(|r| TopRepo {
            name: r.name.clone(),
            stars: r.stargazers_count,
            forks: r.forks_count,
            language: r.language.clone(),
        })
        .collect();

    RepoStats {
        total_stars,
        total_forks,
        total_repos: repos.len(),
        top_repos,
    }
}

/// Commits summed per year-month of push events, with the trailing
/// `months` back-filled with zero so quiet months still chart. A push
/// event with an empty commit list counts as one commit: the feed
/// compresses large pushes but at least one commit happened.
pub fn monthly_commit_trend(
    events: &[Event],
    months: u32,
    now: DateTime<Utc>,
) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();

    for event in events.iter().filter(|e| e.event_type == PUSH_EVENT) {
        let created_at = match parse_timestamp(&event.created_at) {
            Some(ts) => ts,
            None => continue,
        };
        let key = created_at.format("%Y-%m").to_string();
        let commits = event.payload.commits.len().max(1) as u64;
        *counts.entry(key).or_insert(0) += commits;
    }

    let mut cursor = now.date_naive();
    for _ in 0..months {
        counts.entry(cursor.format("%Y-%m").to_string()).or_insert(0);
        cursor = match cursor.checked_sub_months(Months::new(1)) {
            Some(date) => date,
            None => break,
        };
    }

    counts
}

/// Pull-request totals and merge statistics. A PR counts as merged only
/// when its event action is "closed" and the nested record's merged flag
/// is set; durations with missing or malformed timestamps are dropped
/// from the average without affecting the counts.
pub fn pr_merge_stats(events: &[Event]) -> PrStats {
    let mut total_prs = 0;
    let mut merged_prs = 0;
    let mut merge_durations = Vec::new();

    for event in events.iter().filter(|e| e.event_type == PULL_REQUEST_EVENT) {
        total_prs += 1;

        if event.payload.action.as_deref() != Some("closed") {
            continue;
        }
        let pr = match event.payload.pull_request {
            Some(ref pr) => pr,
            None => continue,
        };
        if pr.merged == Some(true) {
            merged_prs += 1;
            if let Some(hours) = merge_duration_hours(pr) {
                merge_durations.push(hours);
            }
        }
    }

    let merge_rate = if total_prs > 0 {
        Some(merged_prs as f64 / total_prs as f64)
    } else {
        None
    };
    let avg_time_to_merge_hours = if merge_durations.is_empty() {
        None
    } else {
        Some(round1(
            merge_durations.iter().sum::<f64>() / merge_durations.len() as f64,
        ))
    };

    PrStats {
        total_prs,
        merged_prs,
        merge_rate,
        avg_time_to_merge_hours,
    }
}

fn merge_duration_hours(pr: &PullRequest) -> Option<f64> {
    let created = parse_timestamp(pr.created_at.as_deref()?)?;
    let closed = parse_timestamp(pr.closed_at.as_deref()?)?;
    Some((closed - created).num_seconds() as f64 / 3600.0)
}

/// Running totals over the probe signals, plus license presence straight
/// from the repository records. `signals` is positionally aligned with
/// `repos` by the pipeline's fan-out.
pub fn repo_health_counts(repos: &[Repository], signals: &[HealthSignals]) -> RepoHealth {
    RepoHealth {
        has_readme: signals.iter().filter(|s| s.has_readme).count() as u32,
        has_ci: signals.iter().filter(|s| s.has_ci).count() as u32,
        has_tests: signals.iter().filter(|s| s.has_tests).count() as u32,
        has_license: repos.iter().filter(|r| r.license.is_some()).count() as u32,
        total_repos_checked: repos.len(),
    }
}
