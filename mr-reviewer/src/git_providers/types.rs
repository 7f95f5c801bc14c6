//! Provider-agnostic data model for webhook deliveries and change requests.

use std::fmt;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{MrResult, PayloadError};

/// Supported Git providers. Determines signature scheme, payload shape and
/// endpoint conventions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    GitHub,
    GitLab,
    Bitbucket,
}

impl ProviderKind {
    /// Lowercase server name used in logs and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Bitbucket => "bitbucket",
        }
    }

    /// What the provider calls a change request in result messages.
    pub fn request_label(self) -> &'static str {
        match self {
            Self::GitLab => "MR",
            Self::GitHub | Self::Bitbucket => "PR",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inbound webhook delivery, exactly as received.
///
/// Header lookups are case-insensitive. The JSON payload is only parsed on
/// demand, after the delivery has been authenticated.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    headers: HeaderMap,
    body: Bytes,
}

impl WebhookRequest {
    pub fn new(headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            headers,
            body: body.into(),
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes, as signed by the provider.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Parses the body as JSON.
    pub fn payload(&self) -> MrResult<Value> {
        serde_json::from_slice(&self.body).map_err(|e| PayloadError::InvalidJson(e).into())
    }
}

/// Normalized identifiers extracted from a payload for one review run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRequestRef {
    /// Where the unified diff is downloaded from.
    pub diff_url: String,
    /// Where the summary comment is posted.
    pub comment_url: String,
    /// Where a batched inline review is posted (GitHub only).
    pub review_url: Option<String>,
    /// Human-readable PR/MR number.
    pub number: String,
}

/// Outcome of reading a webhook payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    /// Event type this relay does not review; carries the reply message.
    Ignored(&'static str),
    /// A change request to review.
    Review(ChangeRequestRef),
}
