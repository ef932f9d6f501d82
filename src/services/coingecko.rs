use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::error::MarketError;
use crate::models::asset::{AssetDetail, AssetSummary, SortOrder};
use crate::services::market_source::MarketSource;

const USER_AGENT: &str = "Cryptocurrency Dashboard";
const API_KEY_HEADER: &str = "x-cg-pro-api-key";

/// CoinGecko-compatible REST client.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl CoinGeckoClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, MarketError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            MarketError::Config(format!("invalid base url {}: {}", config.base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(MarketError::Config(format!(
                "base url {} cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MarketError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url,
        })
    }

    /// `{base}/{segments...}` with every segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, MarketError> {
        let mut request = self
            .client
            .get(url)
            .header("accept", "application/json")
            .query(query);

        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| MarketError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MarketSource for CoinGeckoClient {
    async fn fetch_markets(
        &self,
        order: SortOrder,
        per_page: u32,
    ) -> Result<Vec<AssetSummary>, MarketError> {
        tracing::info!("Fetching {} markets ordered by {} from upstream", per_page, order);

        let per_page = per_page.to_string();
        let markets: Vec<AssetSummary> = self
            .get_json(
                self.endpoint(&["coins", "markets"]),
                &[
                    ("vs_currency", "usd"),
                    ("order", order.as_str()),
                    ("per_page", per_page.as_str()),
                    ("page", "1"),
                    ("sparkline", "false"),
                    ("price_change_percentage", "24h"),
                ],
            )
            .await?;

        tracing::debug!("Fetched {} markets from upstream", markets.len());

        Ok(markets)
    }

    async fn fetch_coin(&self, id: &str) -> Result<AssetDetail, MarketError> {
        tracing::info!("Fetching details for {} from upstream", id);

        self.get_json(
            self.endpoint(&["coins", id]),
            &[
                ("localization", "false"),
                ("tickers", "false"),
                ("market_data", "true"),
                ("community_data", "false"),
                ("developer_data", "false"),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base_url: &str) -> CoinGeckoClient {
        let config = GatewayConfig {
            base_url: base_url.to_string(),
            ..GatewayConfig::default()
        };
        CoinGeckoClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let client = client_for("https://api.coingecko.com/api/v3");
        assert_eq!(
            client.endpoint(&["coins", "markets"]).as_str(),
            "https://api.coingecko.com/api/v3/coins/markets"
        );
    }

    #[test]
    fn test_endpoint_encodes_id() {
        let client = client_for("https://api.coingecko.com/api/v3/");
        assert_eq!(
            client.endpoint(&["coins", "foo/bar?x"]).as_str(),
            "https://api.coingecko.com/api/v3/coins/foo%2Fbar%3Fx"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = GatewayConfig {
            base_url: "not a url".to_string(),
            ..GatewayConfig::default()
        };
        assert!(matches!(
            CoinGeckoClient::new(&config),
            Err(MarketError::Config(_))
        ));
    }
}
