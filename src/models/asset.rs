use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::serde_helpers::{lenient_decimal, null_as_default};
use crate::sanitize::strip_markup;

/// One row of the `/coins/markets` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "image", default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_price: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub market_cap: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub market_cap_rank: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_volume: Decimal,
    #[serde(
        rename = "price_change_percentage_24h",
        default,
        deserialize_with = "null_as_default"
    )]
    pub price_change_percent_24h: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub circulating_supply: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_supply: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub max_supply: Option<Decimal>,
}

/// Full record returned by `/coins/{id}`, kept in the upstream's nested shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDetail {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub description: Description,
    #[serde(default)]
    pub links: AssetLinks,
    #[serde(default)]
    pub market_data: DetailMarketData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default, deserialize_with = "null_as_default")]
    pub en: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetLinks {
    #[serde(default, deserialize_with = "null_as_default")]
    pub homepage: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blockchain_site: Vec<String>,
    #[serde(default)]
    pub repos_url: ReposUrl,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReposUrl {
    #[serde(default, deserialize_with = "null_as_default")]
    pub github: Vec<String>,
}

/// Price in USD. The upstream sends a map keyed by currency; only `usd` is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsdValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub usd: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailMarketData {
    #[serde(default)]
    pub current_price: UsdValue,
    #[serde(default)]
    pub ath: UsdValue,
    #[serde(default)]
    pub atl: UsdValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_change_percentage_7d: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_change_percentage_30d: Decimal,
}

impl AssetDetail {
    pub fn current_price_usd(&self) -> Decimal {
        self.market_data.current_price.usd
    }

    pub fn ath_usd(&self) -> Decimal {
        self.market_data.ath.usd
    }

    pub fn atl_usd(&self) -> Decimal {
        self.market_data.atl.usd
    }

    /// Description text with provider markup removed. The raw `description.en`
    /// is untrusted HTML and must not be rendered as-is.
    pub fn plain_description(&self) -> String {
        strip_markup(&self.description.en)
    }
}

/// Orderings accepted by the upstream `/coins/markets` endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "market_cap_desc")]
    MarketCapDesc,
    #[serde(rename = "price_desc")]
    PriceDesc,
    #[serde(rename = "volume_desc")]
    VolumeDesc,
    #[serde(rename = "price_change_24h_desc")]
    PriceChange24hDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::MarketCapDesc,
        SortOrder::PriceDesc,
        SortOrder::VolumeDesc,
        SortOrder::PriceChange24hDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::MarketCapDesc => "market_cap_desc",
            SortOrder::PriceDesc => "price_desc",
            SortOrder::VolumeDesc => "volume_desc",
            SortOrder::PriceChange24hDesc => "price_change_24h_desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| format!("Unsupported sort order: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sort_order_parses_every_variant() {
        for order in SortOrder::ALL {
            assert_eq!(order.as_str().parse::<SortOrder>(), Ok(order));
        }
        assert!("name_asc".parse::<SortOrder>().is_err());
        assert!("market_cap_desc&x=1".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_summary_reads_upstream_nulls() {
        let json = r#"{
            "id": "newcoin",
            "symbol": "new",
            "name": "New Coin",
            "image": null,
            "current_price": 0.25,
            "market_cap": null,
            "market_cap_rank": null,
            "total_volume": 1000,
            "price_change_percentage_24h": null,
            "circulating_supply": 5000,
            "total_supply": null,
            "max_supply": 100000,
            "ath": 1.2
        }"#;

        let summary: AssetSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.current_price, dec!(0.25));
        assert_eq!(summary.market_cap, Decimal::ZERO);
        assert_eq!(summary.market_cap_rank, 0);
        assert_eq!(summary.image_url, "");
        assert_eq!(summary.total_supply, None);
        assert_eq!(summary.max_supply, Some(dec!(100000)));
    }

    #[test]
    fn test_summary_tolerates_oversized_supply() {
        let json = r#"[
            {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "current_price": 68000,
             "total_supply": 21000000.0, "max_supply": 21000000},
            {"id": "shiba-inu", "symbol": "shib", "name": "Shiba Inu", "current_price": 0.0000175,
             "total_supply": 1e30, "max_supply": 5.89e35}
        ]"#;

        let summaries: Vec<AssetSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].total_supply, Some(dec!(21000000)));
        assert_eq!(summaries[0].max_supply, Some(dec!(21000000)));
        assert_eq!(summaries[1].total_supply, None);
        assert_eq!(summaries[1].max_supply, None);
    }

    #[test]
    fn test_detail_keeps_only_usd_prices() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "description": {"en": "<p>Peer-to-peer <b>cash</b></p>"},
            "links": {
                "homepage": ["https://bitcoin.org"],
                "blockchain_site": ["https://mempool.space"],
                "repos_url": {"github": ["https://github.com/bitcoin/bitcoin"], "bitbucket": []}
            },
            "market_data": {
                "current_price": {"usd": 68000, "eur": 63000},
                "ath": {"usd": 73000},
                "atl": {"usd": 67.81},
                "price_change_percentage_7d": 4.2,
                "price_change_percentage_30d": null
            }
        }"#;

        let detail: AssetDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.current_price_usd(), dec!(68000));
        assert_eq!(detail.ath_usd(), dec!(73000));
        assert_eq!(detail.atl_usd(), dec!(67.81));
        assert_eq!(detail.market_data.price_change_percentage_30d, Decimal::ZERO);
        assert_eq!(detail.links.repos_url.github.len(), 1);
        assert_eq!(detail.plain_description(), "Peer-to-peer cash");
    }
}
