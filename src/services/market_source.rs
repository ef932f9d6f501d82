use async_trait::async_trait;

use crate::error::MarketError;
use crate::models::asset::{AssetDetail, AssetSummary, SortOrder};

/// Remote market-data provider the gateway forwards to.
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// First page of the market listing in the given order.
    async fn fetch_markets(
        &self,
        order: SortOrder,
        per_page: u32,
    ) -> Result<Vec<AssetSummary>, MarketError>;

    async fn fetch_coin(&self, id: &str) -> Result<AssetDetail, MarketError>;
}
