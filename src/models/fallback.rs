//! Hard-coded market snapshot served when the upstream is unavailable.
//!
//! Fallback details are placeholders derived from the snapshot, not real
//! history: ATH is 1.5x and ATL 0.5x the snapshot price.

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::asset::{
    AssetDetail, AssetLinks, AssetSummary, Description, DetailMarketData, ReposUrl, UsdValue,
};

pub const UNAVAILABLE_DESCRIPTION: &str = "Data currently unavailable. Please try again later.";
pub const PLACEHOLDER_HOMEPAGE: &str = "https://example.com";

const ATH_FACTOR: Decimal = dec!(1.5);
const ATL_FACTOR: Decimal = dec!(0.5);

lazy_static! {
    static ref FALLBACK_ASSETS: Vec<AssetSummary> = vec![
        summary(
            "bitcoin", "btc", "Bitcoin",
            "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            dec!(68000), dec!(1330000000000), 1, dec!(25000000000), dec!(2.5),
            dec!(19500000), Some(dec!(21000000)), Some(dec!(21000000)),
        ),
        summary(
            "ethereum", "eth", "Ethereum",
            "https://assets.coingecko.com/coins/images/279/large/ethereum.png",
            dec!(3500), dec!(420000000000), 2, dec!(15000000000), dec!(1.8),
            dec!(120000000), None, None,
        ),
        summary(
            "tether", "usdt", "Tether",
            "https://assets.coingecko.com/coins/images/325/large/Tether.png",
            dec!(1), dec!(95000000000), 3, dec!(50000000000), dec!(0.1),
            dec!(95000000000), Some(dec!(95000000000)), None,
        ),
        summary(
            "binancecoin", "bnb", "BNB",
            "https://assets.coingecko.com/coins/images/825/large/bnb-icon2_2x.png",
            dec!(600), dec!(92000000000), 4, dec!(1500000000), dec!(1.2),
            dec!(153000000), Some(dec!(153000000)), Some(dec!(153000000)),
        ),
        summary(
            "solana", "sol", "Solana",
            "https://assets.coingecko.com/coins/images/4128/large/solana.png",
            dec!(150), dec!(65000000000), 5, dec!(2500000000), dec!(3.5),
            dec!(430000000), Some(dec!(550000000)), None,
        ),
        summary(
            "cardano", "ada", "Cardano",
            "https://assets.coingecko.com/coins/images/975/large/cardano.png",
            dec!(0.45), dec!(16000000000), 9, dec!(500000000), dec!(-1.2),
            dec!(35500000000), Some(dec!(45000000000)), Some(dec!(45000000000)),
        ),
        summary(
            "dogecoin", "doge", "Dogecoin",
            "https://assets.coingecko.com/coins/images/5/large/dogecoin.png",
            dec!(0.15), dec!(21000000000), 8, dec!(1200000000), dec!(0.8),
            dec!(140000000000), None, None,
        ),
        summary(
            "polkadot", "dot", "Polkadot",
            "https://assets.coingecko.com/coins/images/12171/large/polkadot.png",
            dec!(7.5), dec!(10000000000), 12, dec!(350000000), dec!(-0.5),
            dec!(1330000000), Some(dec!(1330000000)), None,
        ),
    ];
}

#[allow(clippy::too_many_arguments)]
fn summary(
    id: &str,
    symbol: &str,
    name: &str,
    image_url: &str,
    current_price: Decimal,
    market_cap: Decimal,
    market_cap_rank: u32,
    total_volume: Decimal,
    price_change_percent_24h: Decimal,
    circulating_supply: Decimal,
    total_supply: Option<Decimal>,
    max_supply: Option<Decimal>,
) -> AssetSummary {
    AssetSummary {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        image_url: image_url.to_string(),
        current_price,
        market_cap,
        market_cap_rank,
        total_volume,
        price_change_percent_24h,
        circulating_supply,
        total_supply,
        max_supply,
    }
}

/// The full fallback listing, in its fixed order.
pub fn fallback_assets() -> Vec<AssetSummary> {
    FALLBACK_ASSETS.clone()
}

pub fn find_fallback(id: &str) -> Option<&'static AssetSummary> {
    FALLBACK_ASSETS.iter().find(|asset| asset.id == id)
}

/// Builds a placeholder detail record from a fallback summary.
pub fn fallback_detail(summary: &AssetSummary) -> AssetDetail {
    AssetDetail {
        id: summary.id.clone(),
        symbol: summary.symbol.clone(),
        name: summary.name.clone(),
        description: Description {
            en: UNAVAILABLE_DESCRIPTION.to_string(),
        },
        links: AssetLinks {
            homepage: vec![PLACEHOLDER_HOMEPAGE.to_string()],
            blockchain_site: Vec::new(),
            repos_url: ReposUrl { github: Vec::new() },
        },
        market_data: DetailMarketData {
            current_price: UsdValue {
                usd: summary.current_price,
            },
            ath: UsdValue {
                usd: summary.current_price * ATH_FACTOR,
            },
            atl: UsdValue {
                usd: summary.current_price * ATL_FACTOR,
            },
            price_change_percentage_7d: Decimal::ZERO,
            price_change_percentage_30d: Decimal::ZERO,
        },
    }
}
