use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{api_error, ApiError, MarketError},
    models::{
        asset::{AssetDetail, AssetSummary},
        response::{AssetDetailRequest, ListAssetsQuery},
    },
    AppState,
};

/// Handler for GET /api/crypto
/// Always 200 for a valid query, with live or fallback data.
pub async fn list_assets(
    State(state): State<AppState>,
    Query(query): Query<ListAssetsQuery>,
) -> Result<Json<Vec<AssetSummary>>, ApiError> {
    tracing::info!("Listing assets with query: {:?}", query);

    state
        .gateway
        .list_assets(query.sort.as_deref(), query.per_page)
        .await
        .map(Json)
        .map_err(into_api_error)
}

/// Handler for POST /api/crypto
/// Body: `{"id": "bitcoin"}`
pub async fn get_asset_detail(
    State(state): State<AppState>,
    Json(request): Json<AssetDetailRequest>,
) -> Result<Json<AssetDetail>, ApiError> {
    tracing::info!("Fetching asset detail for {:?}", request.id);

    state
        .gateway
        .get_asset_detail(request.id.as_deref())
        .await
        .map(Json)
        .map_err(into_api_error)
}

pub async fn health() -> &'static str {
    "ok"
}

fn into_api_error(error: MarketError) -> ApiError {
    match error {
        MarketError::InvalidArgument(message) => api_error(StatusCode::BAD_REQUEST, message),
        other => {
            tracing::error!("Failed to fetch cryptocurrency details: {}", other);
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch cryptocurrency details",
            )
        }
    }
}
