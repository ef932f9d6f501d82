pub mod client;
pub mod coingecko;
pub mod gateway;
pub mod market_source;
