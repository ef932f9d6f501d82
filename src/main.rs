use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coin_dashboard::{
    config::GatewayConfig,
    handlers,
    services::{coingecko::CoinGeckoClient, gateway::MarketGateway},
    AppState,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,coin_dashboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = GatewayConfig::from_env();
    tracing::info!(
        base_url = %config.base_url,
        revalidate_secs = config.revalidate_secs,
        per_page = config.per_page,
        api_key = config.api_key.is_some(),
        "Starting market data gateway"
    );

    let source = CoinGeckoClient::new(&config).expect("Failed to build upstream client");
    let state = AppState {
        gateway: MarketGateway::new(Arc::new(source), &config),
    };

    let app = handlers::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!(
        "Server listening on {}",
        listener
            .local_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| config.bind_addr.clone())
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received, stopping gateway");
        })
        .await
        .expect("Server error");
}
