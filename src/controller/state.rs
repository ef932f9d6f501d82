use chrono::{DateTime, Utc};

use crate::models::asset::{AssetSummary, SortOrder};

pub const NO_DATA_MESSAGE: &str = "No cryptocurrency data available. Please try again later.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Per-session dashboard state. Only the refresh controller writes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchState {
    pub items: Vec<AssetSummary>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub sort_order: SortOrder,
    pub search_term: String,
    pub selected_id: Option<String>,
    pub phase: Phase,
    pub last_updated: Option<DateTime<Utc>>,
}

impl FetchState {
    pub(crate) fn begin_loading(&mut self) {
        self.phase = Phase::Loading;
        self.is_loading = true;
        self.error = None;
    }

    /// Applies a completed listing. An empty listing keeps the previous items.
    pub(crate) fn complete(&mut self, items: Vec<AssetSummary>) {
        self.is_loading = false;

        if items.is_empty() {
            self.phase = Phase::Failed;
            self.error = Some(NO_DATA_MESSAGE.to_string());
        } else {
            self.phase = Phase::Ready;
            self.items = items;
            self.last_updated = Some(Utc::now());
        }
    }

    pub fn visible_items(&self) -> Vec<AssetSummary> {
        filter_assets(&self.items, &self.search_term)
    }
}

/// Case-insensitive substring match on name or symbol, order preserved.
/// An empty term keeps every item.
pub fn filter_assets(items: &[AssetSummary], term: &str) -> Vec<AssetSummary> {
    let needle = term.to_lowercase();

    items
        .iter()
        .filter(|asset| {
            needle.is_empty()
                || asset.name.to_lowercase().contains(&needle)
                || asset.symbol.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
