//! Refresh Controller
//!
//! Owns the dashboard's `FetchState` and re-fetches the listing on mount,
//! sort change, retry and every refresh interval.
//!
//! Every list fetch is tagged with a sequence number. A response is applied
//! only if its number is still the latest issued and the controller has not
//! been stopped; otherwise it is dropped. Both checks happen under the state
//! write lock, which `stop()` also takes, so nothing is written after teardown.

use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::RefreshConfig;
use crate::controller::state::{FetchState, Phase};
use crate::models::asset::{AssetDetail, AssetSummary, SortOrder};
use crate::services::client::DashboardFeed;

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The response was written; carries the resulting phase.
    Applied(Phase),
    /// A newer fetch was issued while this one was in flight.
    Stale,
    /// The controller was stopped before the response arrived.
    TornDown,
}

/// Result of selecting an asset. The detail fetch is independent of the
/// listing; when it fails the view falls back to the summary already held.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Detailed(AssetDetail),
    SummaryOnly(AssetSummary),
}

struct Inner {
    feed: Arc<dyn DashboardFeed>,
    config: RefreshConfig,
    state: RwLock<FetchState>,
    latest_seq: AtomicU64,
    alive: AtomicBool,
}

impl Inner {
    async fn refresh(&self) -> RefreshOutcome {
        let (seq, sort) = {
            let mut state = self.state.write();
            if !self.alive.load(Ordering::SeqCst) {
                return RefreshOutcome::TornDown;
            }
            let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
            state.begin_loading();
            (seq, state.sort_order)
        };

        debug!(seq = seq, sort = %sort, "Refreshing asset listing");
        let items = self.feed.fetch_list(sort, self.config.per_page).await;

        let mut state = self.state.write();
        if !self.alive.load(Ordering::SeqCst) {
            debug!(seq = seq, "Dropping listing that arrived after teardown");
            return RefreshOutcome::TornDown;
        }
        if self.latest_seq.load(Ordering::SeqCst) != seq {
            debug!(seq = seq, "Dropping stale listing");
            return RefreshOutcome::Stale;
        }

        let count = items.len();
        state.complete(items);
        info!(seq = seq, count = count, phase = ?state.phase, "Applied asset listing");

        RefreshOutcome::Applied(state.phase)
    }
}

pub struct RefreshController {
    inner: Arc<Inner>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshController {
    pub fn new(feed: Arc<dyn DashboardFeed>, config: RefreshConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                feed,
                config,
                state: RwLock::new(FetchState::default()),
                latest_seq: AtomicU64::new(0),
                alive: AtomicBool::new(true),
            }),
            task: Mutex::new(None),
        }
    }

    /// Sets the initial sort order without fetching, so the first tick of
    /// `start` loads the listing in that order.
    pub fn with_sort_order(self, order: SortOrder) -> Self {
        self.inner.state.write().sort_order = order;
        self
    }

    /// Starts the repeating refresh. The first tick fires immediately and
    /// serves as the initial load. Calling `start` while running is a no-op.
    pub fn start(&self) {
        let mut task = self.task.lock();
        if task.is_some() {
            warn!("Refresh loop already running");
            return;
        }

        self.inner.alive.store(true, Ordering::SeqCst);

        let inner = self.inner.clone();
        let period = Duration::from_secs(inner.config.refresh_interval_secs.max(1));
        *task = Some(tokio::spawn(async move {
            info!("Starting dashboard refresh (every {} seconds)", period.as_secs());

            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                inner.refresh().await;
            }
        }));
    }

    /// Cancels the repeating refresh and invalidates every in-flight fetch.
    pub fn stop(&self) {
        let handle = self.task.lock().take();

        {
            let _state = self.inner.state.write();
            self.inner.alive.store(false, Ordering::SeqCst);
            self.inner.latest_seq.fetch_add(1, Ordering::SeqCst);
        }

        if let Some(handle) = handle {
            handle.abort();
            info!("Dashboard refresh stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.lock().is_some()
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        self.inner.refresh().await
    }

    pub async fn retry(&self) -> RefreshOutcome {
        self.inner.refresh().await
    }

    pub async fn set_sort_order(&self, order: SortOrder) -> RefreshOutcome {
        {
            let mut state = self.inner.state.write();
            if !self.inner.alive.load(Ordering::SeqCst) {
                return RefreshOutcome::TornDown;
            }
            state.sort_order = order;
        }
        self.inner.refresh().await
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        let mut state = self.inner.state.write();
        if self.inner.alive.load(Ordering::SeqCst) {
            state.search_term = term.into();
        }
    }

    pub fn visible_items(&self) -> Vec<AssetSummary> {
        self.inner.state.read().visible_items()
    }

    /// Marks `id` as selected and fetches its detail. Returns `None` when the
    /// id is not part of the current listing.
    pub async fn select(&self, id: &str) -> Option<Selection> {
        let summary = {
            let mut state = self.inner.state.write();
            if !self.inner.alive.load(Ordering::SeqCst) {
                return None;
            }
            let summary = state.items.iter().find(|asset| asset.id == id).cloned()?;
            state.selected_id = Some(id.to_string());
            summary
        };

        match self.inner.feed.fetch_detail(id).await {
            Some(detail) => Some(Selection::Detailed(detail)),
            None => Some(Selection::SummaryOnly(summary)),
        }
    }

    pub fn clear_selection(&self) {
        let mut state = self.inner.state.write();
        if self.inner.alive.load(Ordering::SeqCst) {
            state.selected_id = None;
        }
    }

    pub fn state(&self) -> FetchState {
        self.inner.state.read().clone()
    }
}

impl Drop for RefreshController {
    fn drop(&mut self) {
        if let Some(handle) = self.task.get_mut().take() {
            handle.abort();
        }
    }
}
