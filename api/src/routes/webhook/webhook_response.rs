use serde::Serialize;

/// Body returned once a delivery has been handled (reviewed or ignored).
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// Always `"processed"`.
    pub status: &'static str,
    /// Adapter result, e.g. `Posted review for PR #42`.
    pub message: String,
}

impl WebhookResponse {
    pub fn processed(message: String) -> Self {
        Self {
            status: "processed",
            message,
        }
    }
}
