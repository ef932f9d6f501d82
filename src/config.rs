//! Environment-driven configuration for the gateway and the refresh loop.
//!
//! Every value has a default; a missing or malformed variable falls back to it.

use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_REVALIDATE_SECS: u64 = 60;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PER_PAGE: u32 = 50;
pub const MAX_PER_PAGE: u32 = 250;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

const ENV_BASE_URL: &str = "MARKET_API_BASE_URL";
const ENV_API_KEY: &str = "MARKET_API_KEY";
const ENV_REVALIDATE_SECS: &str = "MARKET_REVALIDATE_SECS";
const ENV_UPSTREAM_TIMEOUT_SECS: &str = "MARKET_UPSTREAM_TIMEOUT_SECS";
const ENV_DEFAULT_PER_PAGE: &str = "MARKET_DEFAULT_PER_PAGE";
const ENV_BIND_ADDR: &str = "BIND_ADDR";
const ENV_GATEWAY_URL: &str = "GATEWAY_URL";
const ENV_REFRESH_INTERVAL_SECS: &str = "DASHBOARD_REFRESH_INTERVAL_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub revalidate_secs: u64,
    pub upstream_timeout_secs: u64,
    pub per_page: u32,
    pub bind_addr: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            revalidate_secs: DEFAULT_REVALIDATE_SECS,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            per_page: DEFAULT_PER_PAGE,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let per_page = parse_or(lookup(ENV_DEFAULT_PER_PAGE), defaults.per_page);
        let per_page = if (1..=MAX_PER_PAGE).contains(&per_page) {
            per_page
        } else {
            defaults.per_page
        };

        Self {
            base_url: lookup(ENV_BASE_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.base_url),
            api_key: lookup(ENV_API_KEY).filter(|key| !key.trim().is_empty()),
            revalidate_secs: parse_or(lookup(ENV_REVALIDATE_SECS), defaults.revalidate_secs),
            upstream_timeout_secs: parse_or(
                lookup(ENV_UPSTREAM_TIMEOUT_SECS),
                defaults.upstream_timeout_secs,
            ),
            per_page,
            bind_addr: lookup(ENV_BIND_ADDR).unwrap_or(defaults.bind_addr),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshConfig {
    pub gateway_url: String,
    pub refresh_interval_secs: u64,
    pub per_page: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl RefreshConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // tokio::time::interval panics on a zero period
        let refresh_interval_secs =
            parse_or(lookup(ENV_REFRESH_INTERVAL_SECS), defaults.refresh_interval_secs).max(1);

        Self {
            gateway_url: lookup(ENV_GATEWAY_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.gateway_url),
            refresh_interval_secs,
            per_page: parse_or(lookup(ENV_DEFAULT_PER_PAGE), defaults.per_page)
                .clamp(1, MAX_PER_PAGE),
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}
