//! Market Data Gateway
//!
//! Forwards list/detail requests to the upstream market source, reuses
//! successful results for the revalidation window and substitutes the
//! fallback snapshot when the upstream fails.
//!
//! The two operations mask failures differently: a failed listing always
//! yields the fallback set, while a failed detail lookup only succeeds for
//! ids present in that set and is otherwise reported as `NotFound`.

use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{GatewayConfig, MAX_PER_PAGE};
use crate::error::MarketError;
use crate::models::asset::{AssetDetail, AssetSummary, SortOrder};
use crate::models::fallback::{fallback_assets, fallback_detail, find_fallback};
use crate::services::market_source::MarketSource;

const LIST_CACHE_CAPACITY: u64 = 64;
const DETAIL_CACHE_CAPACITY: u64 = 500;

#[derive(Clone)]
pub struct MarketGateway {
    source: Arc<dyn MarketSource>,
    list_cache: Option<Cache<(SortOrder, u32), Arc<Vec<AssetSummary>>>>,
    detail_cache: Option<Cache<String, Arc<AssetDetail>>>,
    default_per_page: u32,
}

impl MarketGateway {
    /// A `revalidate_secs` of zero disables result reuse.
    pub fn new(source: Arc<dyn MarketSource>, config: &GatewayConfig) -> Self {
        let ttl = Duration::from_secs(config.revalidate_secs);
        let enabled = config.revalidate_secs > 0;

        let list_cache = enabled.then(|| {
            Cache::builder()
                .max_capacity(LIST_CACHE_CAPACITY)
                .time_to_live(ttl)
                .build()
        });
        let detail_cache = enabled.then(|| {
            Cache::builder()
                .max_capacity(DETAIL_CACHE_CAPACITY)
                .time_to_live(ttl)
                .build()
        });

        Self {
            source,
            list_cache,
            detail_cache,
            default_per_page: config.per_page,
        }
    }

    /// ListAssets: validates the raw query values, then serves the listing.
    /// Only `InvalidArgument` is ever returned; upstream failures are absorbed.
    pub async fn list_assets(
        &self,
        sort: Option<&str>,
        per_page: Option<u32>,
    ) -> Result<Vec<AssetSummary>, MarketError> {
        let order = match sort.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<SortOrder>().map_err(MarketError::InvalidArgument)?,
            None => SortOrder::default(),
        };

        let per_page = per_page.unwrap_or(self.default_per_page);
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(MarketError::InvalidArgument(format!(
                "per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE, per_page
            )));
        }

        Ok(self.list(order, per_page).await)
    }

    /// Listing for an already-validated order and page size.
    pub async fn list(&self, order: SortOrder, per_page: u32) -> Vec<AssetSummary> {
        let key = (order, per_page);

        if let Some(cache) = &self.list_cache {
            if let Some(cached) = cache.get(&key).await {
                debug!("Cache hit for listing {} x{}", order, per_page);
                return cached.as_ref().clone();
            }
        }

        match self.source.fetch_markets(order, per_page).await {
            Ok(assets) => {
                info!("Fetched {} live assets ordered by {}", assets.len(), order);
                if let Some(cache) = &self.list_cache {
                    cache.insert(key, Arc::new(assets.clone())).await;
                }
                assets
            }
            Err(e) => {
                warn!(error = %e, "Upstream listing failed, serving fallback data");
                fallback_assets()
            }
        }
    }

    /// GetAssetDetail: requires a non-blank id.
    pub async fn get_asset_detail(&self, id: Option<&str>) -> Result<AssetDetail, MarketError> {
        let id = id.map(str::trim).filter(|id| !id.is_empty()).ok_or_else(|| {
            MarketError::InvalidArgument("Cryptocurrency ID is required".to_string())
        })?;

        if let Some(cache) = &self.detail_cache {
            if let Some(cached) = cache.get(id).await {
                debug!("Cache hit for detail {}", id);
                return Ok(cached.as_ref().clone());
            }
        }

        match self.source.fetch_coin(id).await {
            Ok(detail) => {
                if let Some(cache) = &self.detail_cache {
                    cache.insert(id.to_string(), Arc::new(detail.clone())).await;
                }
                Ok(detail)
            }
            Err(e) => match find_fallback(id) {
                Some(summary) => {
                    warn!(error = %e, id = %id, "Upstream detail failed, serving fallback detail");
                    Ok(fallback_detail(summary))
                }
                None => {
                    warn!(error = %e, id = %id, "Upstream detail failed and no fallback exists");
                    Err(MarketError::NotFound(id.to_string()))
                }
            },
        }
    }
}
