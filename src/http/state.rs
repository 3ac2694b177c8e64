//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::ReservationLifecycleManager;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The scheduling engine.
    pub engine: Arc<ReservationLifecycleManager>,
    /// Repository instance for direct record access.
    pub repository: Arc<dyn FullRepository>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(engine: Arc<ReservationLifecycleManager>, repository: Arc<dyn FullRepository>) -> Self {
        Self { engine, repository }
    }
}
