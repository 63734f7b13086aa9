use reqwest::Client;
use serde::de::DeserializeOwned;

/// Page loop shared by the repository and event fetches. Any page failure
/// truncates the collection at the last good page; nothing is retried or
/// propagated.
pub struct Paginator<'a> {
    client: &'a Client,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetch pages starting at 1 until one fails or comes back empty.
    pub async fn fetch_all<T: DeserializeOwned>(&self, base_url: &str, per_page: u32) -> Vec<T> {
        self.fetch_pages(base_url, per_page, None).await
    }

    /// Same loop, bounded by a page-count ceiling.
    pub async fn fetch_limited<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
        max_pages: u32,
    ) -> Vec<T> {
        self.fetch_pages(base_url, per_page, Some(max_pages)).await
    }

    async fn fetch_pages<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
        max_pages: Option<u32>,
    ) -> Vec<T> {
        let mut all_items = Vec::new();
        let mut page = 1u32;

        loop {
            if let Some(limit) = max_pages {
                if page > limit {
                    break;
                }
            }

            let separator = if base_url.contains('?') { "&" } else { "?" };
            let url = format!("{}{}per_page={}&page={}", base_url, separator, per_page, page);

            tracing::debug!("Fetching: {}", url);
            let response = match self.client.get(&url).send().await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("Page {} failed, truncating: {}", page, e);
                    break;
                }
            };

            if !response.status().is_success() {
                tracing::warn!("Page {} returned {}, truncating", page, response.status());
                break;
            }

            let items: Vec<T> = match response.json().await {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!("Page {} failed to parse, truncating: {}", page, e);
                    break;
                }
            };

            if items.is_empty() {
                break;
            }

            all_items.extend(items);
            page += 1;
        }

        all_items
    }
}
