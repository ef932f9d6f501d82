pub mod asset;
pub mod fallback;
pub mod response;
pub mod serde_helpers;
