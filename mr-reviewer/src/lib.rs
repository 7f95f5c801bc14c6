//! Core of the review relay.
//!
//! A provider webhook goes through four steps, all driven by
//! [`ReviewRelay::process`]:
//!
//! 1) **Dispatch** ([`dispatch`]) picks GitHub, GitLab or Bitbucket from the
//!    request headers alone.
//! 2) **Verify** ([`signature`]) checks the provider's HMAC over the raw body
//!    in constant time; a missing signature fails.
//! 3) **Review** ([`review`]) fetches the diff, asks the LLM for a review in a
//!    fixed markdown template and parses the rating and inline suggestions.
//! 4) **Publish** ([`git_providers`]) posts the summary comment (plus a
//!    batched inline review on GitHub).
//!
//! Like the rest of the workspace it avoids `async-trait` and `Box<dyn ...>`:
//! plain `async fn` and enum-dispatch over thin provider adapters.

pub mod config;
pub mod dispatch;
pub mod errors;
pub mod git_providers;
pub mod relay;
pub mod review;
pub mod signature;

pub use config::RelayConfig;
pub use dispatch::{select_adapter, select_provider};
pub use errors::{Error, MrResult};
pub use git_providers::{ATTRIBUTION, ProviderAdapter, ProviderKind, WebhookRequest};
pub use relay::ReviewRelay;
pub use review::{InlineCommentDirective, ReviewGenerator, ReviewResult, extract_inline_directives};
