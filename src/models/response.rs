use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAssetsQuery {
    pub sort: Option<String>,
    pub per_page: Option<u32>,
}

/// Body of `POST /api/crypto`. `id` stays optional so a missing field is
/// reported as 400 by the handler instead of a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetDetailRequest {
    pub id: Option<String>,
}

/// Price series as `(timestamp_ms, price)` pairs, same layout as the
/// upstream `market_chart` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub prices: Vec<(i64, f64)>,
}
