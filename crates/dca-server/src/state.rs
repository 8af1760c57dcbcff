//! Application State

use std::sync::Arc;

use dca_engine::feed::PriceFeed;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Price history source (mock or files, behind the request cache)
    pub feed: Arc<dyn PriceFeed>,
}

impl AppState {
    pub fn new(feed: Arc<dyn PriceFeed>) -> Self {
        Self { feed }
    }
}
