pub mod refresh;
pub mod state;

pub use refresh::{RefreshController, RefreshOutcome, Selection};
pub use state::{filter_assets, FetchState, Phase};
