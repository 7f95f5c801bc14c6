//! Header-based provider routing.
//!
//! First match wins, no payload inspection:
//! 1. `X-GitHub-Event` → GitHub
//! 2. `X-Gitlab-Event` → GitLab
//! 3. `X-Hub-Signature` + `User-Agent` containing `Bitbucket` → Bitbucket
//!
//! Spoofed or mixed headers can misroute a delivery; signature verification
//! against the chosen provider's scheme is what rejects it.

use reqwest::{Client, header::HeaderMap};

use crate::config::RelayConfig;
use crate::git_providers::{ProviderAdapter, ProviderKind};

const GITHUB_EVENT: &str = "x-github-event";
const GITLAB_EVENT: &str = "x-gitlab-event";
const GENERIC_SIGNATURE: &str = "x-hub-signature";
const BITBUCKET_AGENT_MARKER: &str = "Bitbucket";

/// Picks the provider for a delivery from its headers alone.
pub fn select_provider(headers: &HeaderMap) -> Option<ProviderKind> {
    if headers.contains_key(GITHUB_EVENT) {
        return Some(ProviderKind::GitHub);
    }
    if headers.contains_key(GITLAB_EVENT) {
        return Some(ProviderKind::GitLab);
    }

    let bitbucket_agent = headers
        .get(reqwest::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ua| ua.contains(BITBUCKET_AGENT_MARKER));
    if headers.contains_key(GENERIC_SIGNATURE) && bitbucket_agent {
        return Some(ProviderKind::Bitbucket);
    }

    None
}

/// [`select_provider`] plus adapter construction.
pub fn select_adapter(headers: &HeaderMap, http: &Client, config: &RelayConfig) -> Option<ProviderAdapter> {
    select_provider(headers).map(|kind| ProviderAdapter::for_kind(kind, http.clone(), config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut h = HeaderMap::new();
        for (k, v) in pairs {
            h.insert(*k, HeaderValue::from_static(*v));
        }
        h
    }

    #[test]
    fn github_event_header_selects_github() {
        assert_eq!(
            select_provider(&headers(&[("x-github-event", "pull_request")])),
            Some(ProviderKind::GitHub)
        );
    }

    #[test]
    fn gitlab_event_header_selects_gitlab() {
        assert_eq!(
            select_provider(&headers(&[("x-gitlab-event", "Merge Request Hook")])),
            Some(ProviderKind::GitLab)
        );
    }

    #[test]
    fn bitbucket_needs_signature_and_agent() {
        assert_eq!(
            select_provider(&headers(&[
                ("x-hub-signature", "abc"),
                ("user-agent", "Bitbucket-Webhooks/2.0"),
            ])),
            Some(ProviderKind::Bitbucket)
        );
        assert_eq!(
            select_provider(&headers(&[("user-agent", "Bitbucket-Webhooks/2.0")])),
            None
        );
        assert_eq!(
            select_provider(&headers(&[("x-hub-signature", "abc"), ("user-agent", "curl/8.0")])),
            None
        );
    }

    #[test]
    fn github_wins_when_both_event_headers_present() {
        assert_eq!(
            select_provider(&headers(&[
                ("x-gitlab-event", "Merge Request Hook"),
                ("x-github-event", "pull_request"),
            ])),
            Some(ProviderKind::GitHub)
        );
    }

    #[test]
    fn empty_headers_select_nothing() {
        assert_eq!(select_provider(&HeaderMap::new()), None);
        let cfg = RelayConfig::with_secret("s");
        assert!(select_adapter(&HeaderMap::new(), &Client::new(), &cfg).is_none());
    }

    #[test]
    fn adapter_matches_selected_kind() {
        let cfg = RelayConfig::with_secret("s");
        let adapter = select_adapter(&headers(&[("x-gitlab-event", "x")]), &Client::new(), &cfg).unwrap();
        assert_eq!(adapter.server_type(), ProviderKind::GitLab);
    }
}
