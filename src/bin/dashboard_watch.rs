//! Terminal view of the dashboard: keeps the refresh loop running against a
//! gateway and prints the visible assets whenever a new listing lands.
//!
//! Usage: dashboard_watch [sort_order] [search_term]

use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coin_dashboard::config::RefreshConfig;
use coin_dashboard::controller::{FetchState, Phase, RefreshController};
use coin_dashboard::format::{format_currency, format_number, format_percentage};
use coin_dashboard::models::asset::SortOrder;
use coin_dashboard::services::client::DashboardClient;

const ROWS: usize = 20;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,coin_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    let sort = match args.get(1) {
        Some(raw) => raw.parse::<SortOrder>()?,
        None => SortOrder::default(),
    };
    let search = args.get(2).cloned().unwrap_or_default();

    let config = RefreshConfig::from_env();
    tracing::info!(
        gateway_url = %config.gateway_url,
        refresh_interval_secs = config.refresh_interval_secs,
        sort = %sort,
        "Watching dashboard"
    );

    let client = DashboardClient::new(config.gateway_url.clone());
    let controller = RefreshController::new(Arc::new(client), config).with_sort_order(sort);
    controller.set_search_term(search);
    controller.start();

    let mut poll = tokio::time::interval(Duration::from_secs(1));
    let mut last_seen = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
            _ = poll.tick() => {
                let state = controller.state();
                let marker = (state.last_updated, state.phase);
                if state.phase != Phase::Loading && last_seen != Some(marker) {
                    last_seen = Some(marker);
                    print_state(&state);
                }
            }
        }
    }

    controller.stop();
    Ok(())
}

fn print_state(state: &FetchState) {
    if let Some(error) = &state.error {
        println!("! {}", error);
    }

    let visible = state.visible_items();
    if visible.is_empty() {
        println!("No cryptocurrencies found matching your search.");
        return;
    }

    println!(
        "{:>4}  {:<18} {:>14} {:>9} {:>12} {:>12}",
        "#", "Name", "Price", "24h", "Market Cap", "Supply"
    );
    for asset in visible.iter().take(ROWS) {
        let direction = if asset.price_change_percent_24h.is_sign_negative() { "-" } else { "+" };
        println!(
            "{:>4}  {:<18} {:>14} {:>9} {:>12} {:>12}",
            asset.market_cap_rank,
            format!("{} ({})", asset.name, asset.symbol.to_uppercase()),
            format_currency(asset.current_price),
            format!("{}{}", direction, format_percentage(asset.price_change_percent_24h)),
            format_currency(asset.market_cap),
            format_number(asset.circulating_supply),
        );
    }

    if let Some(updated) = state.last_updated {
        println!("updated {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }
}
