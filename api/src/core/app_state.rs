use mr_reviewer::ReviewRelay;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Webhook pipeline: routing, signature check, review and publishing.
    pub relay: ReviewRelay,
}

impl AppState {
    pub fn new(relay: ReviewRelay) -> Self {
        Self { relay }
    }
}
