// src/lib.rs

use services::gateway::MarketGateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: MarketGateway,
}

pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod handlers;
pub mod models;
pub mod sanitize;
pub mod services;
