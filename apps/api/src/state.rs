use std::sync::Arc;

use crate::harvest::ApplicantTracker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Where validated applications are sent. `HarvestClient` in production.
    pub tracker: Arc<dyn ApplicantTracker>,
}
