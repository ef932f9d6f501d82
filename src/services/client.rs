//! Client Data Service
//!
//! Typed HTTP client for the gateway. Nothing escapes this boundary: every
//! failure collapses into an empty listing or `None`, and is logged.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::error;

use crate::models::asset::{AssetDetail, AssetSummary, SortOrder};
use crate::models::response::PriceHistory;

const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HISTORY_DAYS: u32 = 7;

/// Data the dashboard consumes. Implementations never fail; an empty list or
/// `None` stands for every failure mode.
#[async_trait]
pub trait DashboardFeed: Send + Sync {
    async fn fetch_list(&self, sort: SortOrder, per_page: u32) -> Vec<AssetSummary>;

    async fn fetch_detail(&self, id: &str) -> Option<AssetDetail>;
}

#[derive(Clone)]
pub struct DashboardClient {
    client: Client,
    gateway_url: String,
}

impl DashboardClient {
    pub fn new(gateway_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            client,
            gateway_url: gateway_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.gateway_url, path)
    }

    /// Reserved for price charts; the gateway serves no history route yet,
    /// so this currently resolves to `None`.
    pub async fn fetch_history(&self, id: &str, days: u32) -> Option<PriceHistory> {
        let days = days.to_string();
        let request = self
            .client
            .get(self.url("/api/crypto/history"))
            .query(&[("id", id), ("days", days.as_str())]);

        match read_json(request).await {
            Ok(history) => Some(history),
            Err(e) => {
                error!("Error fetching history for {}: {}", id, e);
                None
            }
        }
    }
}

#[async_trait]
impl DashboardFeed for DashboardClient {
    async fn fetch_list(&self, sort: SortOrder, per_page: u32) -> Vec<AssetSummary> {
        let per_page = per_page.to_string();
        let request = self
            .client
            .get(self.url("/api/crypto"))
            .query(&[("sort", sort.as_str()), ("per_page", per_page.as_str())]);

        match read_json(request).await {
            Ok(assets) => assets,
            Err(e) => {
                error!("Error fetching crypto data: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_detail(&self, id: &str) -> Option<AssetDetail> {
        let request = self
            .client
            .post(self.url("/api/crypto"))
            .json(&json!({ "id": id }));

        match read_json(request).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                error!("Error fetching details for {}: {}", id, e);
                None
            }
        }
    }
}

async fn read_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    let response = request.send().await?;

    if !response.status().is_success() {
        return Err(format!("API error: {}", response.status()).into());
    }

    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_url_trailing_slash() {
        let client = DashboardClient::new("http://localhost:3000/");
        assert_eq!(client.url("/api/crypto"), "http://localhost:3000/api/crypto");
    }
}
