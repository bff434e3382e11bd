use std::sync::Arc;

use crate::config::Config;
use crate::counseling::pipeline::Counselor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup; concurrent requests share it without locking.
    pub counselor: Arc<Counselor>,
    pub config: Config,
}
