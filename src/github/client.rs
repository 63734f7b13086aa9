use reqwest::{header, Client};

use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::models::{Event, GitHubUser, Repository};

const PAGE_SIZE: u32 = 100;

/// Per-repository presence probes. A probe error reads as absence; none
/// of these can fail a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthSignals {
    pub has_readme: bool,
    pub has_ci: bool,
    pub has_tests: bool,
}

pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitmetrics/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: "https://api.github.com".to_string(),
        })
    }

    /// The only fatal fetch: any non-success status aborts the run with the
    /// status attached, so the caller can report it.
    pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching user: {}", username);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Error::UserNotFound {
                username: username.to_string(),
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }

    pub async fn get_user_repos(&self, username: &str) -> Vec<Repository> {
        let url = format!("{}/users/{}/repos", self.base_url, username);
        let paginator = Paginator::new(&self.client);
        tracing::info!("Fetching repositories for: {}", username);
        paginator.fetch_all(&url, PAGE_SIZE).await
    }

    /// The events feed is capped upstream and does not reliably terminate
    /// with an empty page, hence the page ceiling.
    pub async fn get_user_events(&self, username: &str, max_pages: u32) -> Vec<Event> {
        let url = format!("{}/users/{}/events", self.base_url, username);
        let paginator = Paginator::new(&self.client);
        tracing::info!("Fetching events for: {}", username);
        paginator.fetch_limited(&url, PAGE_SIZE, max_pages).await
    }

    /// Three existence probes against the contents API, using this
    /// repository's own owner. The `test` path is only tried when `tests`
    /// came back absent.
    pub async fn get_repo_health_signals(&self, owner: &str, repo: &str) -> HealthSignals {
        let base = format!("{}/repos/{}/{}/contents", self.base_url, owner, repo);

        let has_readme = self.probe(&format!("{}/README.md", base)).await;
        let has_ci = self.probe(&format!("{}/.github/workflows", base)).await;
        let has_tests = self.probe(&format!("{}/tests", base)).await
            || self.probe(&format!("{}/test", base)).await;

        HealthSignals {
            has_readme,
            has_ci,
            has_tests,
        }
    }

    async fn probe(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Probe failed for {}: {}", url, e);
                false
            }
        }
    }
}
