#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Response, Router};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use coin_dashboard::{
    config::GatewayConfig,
    error::MarketError,
    handlers,
    models::asset::{AssetDetail, AssetSummary, Description, DetailMarketData, SortOrder, UsdValue},
    services::{gateway::MarketGateway, market_source::MarketSource},
    AppState,
};

/// How the scripted upstream answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Upstream {
    Healthy,
    Status(u16),
    Unreachable,
}

/// In-process market source with switchable failure modes.
pub struct ScriptedSource {
    mode: Mutex<Upstream>,
    markets: Vec<AssetSummary>,
    pub market_calls: AtomicUsize,
    pub coin_calls: AtomicUsize,
    pub last_market_request: Mutex<Option<(SortOrder, u32)>>,
}

impl ScriptedSource {
    pub fn new(mode: Upstream, markets: Vec<AssetSummary>) -> Arc<Self> {
        Arc::new(Self {
            mode: Mutex::new(mode),
            markets,
            market_calls: AtomicUsize::new(0),
            coin_calls: AtomicUsize::new(0),
            last_market_request: Mutex::new(None),
        })
    }

    pub fn set_mode(&self, mode: Upstream) {
        *self.mode.lock() = mode;
    }

    async fn failure(&self) -> Option<MarketError> {
        let mode = *self.mode.lock();
        match mode {
            Upstream::Healthy => None,
            Upstream::Status(status) => Some(MarketError::UpstreamStatus {
                status,
                body: "scripted failure".to_string(),
            }),
            Upstream::Unreachable => Some(MarketError::Transport(transport_error().await)),
        }
    }
}

#[async_trait]
impl MarketSource for ScriptedSource {
    async fn fetch_markets(
        &self,
        order: SortOrder,
        per_page: u32,
    ) -> Result<Vec<AssetSummary>, MarketError> {
        self.market_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_market_request.lock() = Some((order, per_page));

        if let Some(error) = self.failure().await {
            return Err(error);
        }
        Ok(self.markets.iter().take(per_page as usize).cloned().collect())
    }

    async fn fetch_coin(&self, id: &str) -> Result<AssetDetail, MarketError> {
        self.coin_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.failure().await {
            return Err(error);
        }
        let summary = self
            .markets
            .iter()
            .find(|asset| asset.id == id)
            .ok_or(MarketError::UpstreamStatus {
                status: 404,
                body: r#"{"error":"coin not found"}"#.to_string(),
            })?;

        Ok(live_detail(summary))
    }
}

pub fn live_detail(summary: &AssetSummary) -> AssetDetail {
    AssetDetail {
        id: summary.id.clone(),
        symbol: summary.symbol.clone(),
        name: summary.name.clone(),
        description: Description {
            en: format!("<p>{} live description</p>", summary.name),
        },
        links: Default::default(),
        market_data: DetailMarketData {
            current_price: UsdValue {
                usd: summary.current_price,
            },
            ..Default::default()
        },
    }
}

/// Two records as the upstream would return them for `volume_desc`.
pub fn live_markets() -> Vec<AssetSummary> {
    serde_json::from_value(serde_json::json!([
        {
            "id": "tether",
            "symbol": "usdt",
            "name": "Tether",
            "image": "https://assets.coingecko.com/coins/images/325/large/Tether.png",
            "current_price": 1.0,
            "market_cap": 118000000000u64,
            "market_cap_rank": 3,
            "total_volume": 61000000000u64,
            "price_change_percentage_24h": 0.02,
            "circulating_supply": 118000000000u64,
            "total_supply": 118000000000u64,
            "max_supply": null
        },
        {
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            "current_price": 71234.5,
            "market_cap": 1402000000000u64,
            "market_cap_rank": 1,
            "total_volume": 38000000000u64,
            "price_change_percentage_24h": -1.75,
            "circulating_supply": 19680000,
            "total_supply": 21000000,
            "max_supply": 21000000
        }
    ]))
    .expect("valid market fixture")
}

pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        revalidate_secs: 60,
        ..GatewayConfig::default()
    }
}

pub fn build_router(source: Arc<dyn MarketSource>, config: &GatewayConfig) -> Router {
    let state = AppState {
        gateway: MarketGateway::new(source, config),
    };
    handlers::router(state)
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a local port that nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// A genuine connection-refused error from reqwest.
pub async fn transport_error() -> reqwest::Error {
    let url = closed_port_url().await;
    reqwest::get(url)
        .await
        .expect_err("nothing listens on a closed port")
}

pub async fn read_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
