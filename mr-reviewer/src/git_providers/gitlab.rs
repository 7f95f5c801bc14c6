//! GitLab adapter (merge request hooks).
//!
//! Reviews every `object_kind == "merge_request"` delivery. The diff comes
//! from `object_attributes.diff_url`; the summary goes to
//! `object_attributes.url` + `/discussions`. No inline comments.

use reqwest::{Client, RequestBuilder, header};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{MrResult, PayloadError};
use crate::git_providers::http::{fetch_text, post_created};
use crate::git_providers::types::{ChangeRequestRef, ProviderKind, WebhookEvent};

#[derive(Debug, Clone)]
pub struct GitLabAdapter {
    http: Client,
    token: Option<String>,
}

impl GitLabAdapter {
    pub fn new(http: Client, token: Option<String>) -> Self {
        Self { http, token }
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.header(header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => req.header("PRIVATE-TOKEN", token),
            None => req,
        }
    }

    pub fn classify(payload: &Value) -> MrResult<WebhookEvent> {
        if payload.get("object_kind").and_then(Value::as_str) != Some("merge_request") {
            return Ok(WebhookEvent::Ignored("Only processing merge requests"));
        }

        let event = MergeRequestEvent::deserialize(payload).map_err(|source| PayloadError::Shape {
            provider: ProviderKind::GitLab,
            source,
        })?;
        let mr = event.object_attributes;

        Ok(WebhookEvent::Review(ChangeRequestRef {
            comment_url: format!("{}/discussions", mr.url.trim_end_matches('/')),
            diff_url: mr.diff_url,
            review_url: None,
            number: mr.iid.to_string(),
        }))
    }

    pub async fn fetch_diff(&self, url: &str) -> MrResult<String> {
        fetch_text(self.authorize(self.http.get(url)), url).await
    }

    pub async fn post_comment(&self, url: &str, body: &str) -> bool {
        post_created(self.authorize(self.http.post(url)), url, &NoteBody { body }).await
    }
}

#[derive(Debug, Deserialize)]
struct MergeRequestEvent {
    object_attributes: MergeRequestAttributes,
}

#[derive(Debug, Deserialize)]
struct MergeRequestAttributes {
    iid: u64,
    url: String,
    diff_url: String,
}

#[derive(Debug, Serialize)]
struct NoteBody<'a> {
    body: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_request_yields_discussions_url() {
        let payload = json!({
            "object_kind": "merge_request",
            "object_attributes": {
                "iid": 7,
                "url": "https://gitlab.example.com/api/v4/projects/1/merge_requests/7",
                "diff_url": "https://gitlab.example.com/g/p/-/merge_requests/7.diff"
            }
        });
        let WebhookEvent::Review(cr) = GitLabAdapter::classify(&payload).unwrap() else {
            panic!("expected review");
        };
        assert_eq!(cr.number, "7");
        assert!(cr.comment_url.ends_with("/merge_requests/7/discussions"));
        assert_eq!(cr.review_url, None);
    }

    #[test]
    fn other_kinds_are_ignored() {
        let payload = json!({"object_kind": "push"});
        assert_eq!(
            GitLabAdapter::classify(&payload).unwrap(),
            WebhookEvent::Ignored("Only processing merge requests")
        );
    }

    #[test]
    fn missing_attributes_is_a_shape_error() {
        let payload = json!({"object_kind": "merge_request"});
        assert!(GitLabAdapter::classify(&payload).is_err());
    }
}
