//! Webhook signature verification.
//!
//! Every provider signs the raw request body with the shared webhook secret,
//! but algorithm and presentation differ:
//!
//! | Provider  | HMAC    | Header value            |
//! |-----------|---------|-------------------------|
//! | GitHub    | SHA-256 | `sha256=<hex>`          |
//! | GitLab    | SHA-1   | `<hex>`                 |
//! | Bitbucket | SHA-256 | `<hex>`                 |
//!
//! GitLab's SHA-1 is kept for compatibility with the scheme already deployed
//! on existing hooks.
//!
//! Verification fails closed: a missing header is a failed check. The final
//! comparison is constant-time over the string forms.

use hmac::{Hmac, Mac};
use reqwest::header::HeaderMap;
use sha1::Sha1;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::git_providers::ProviderKind;

/// Signature headers, in lookup order. The first one present is used
/// regardless of which provider was selected. A header whose value is empty
/// or not valid UTF-8 is skipped as if absent; such a value could never
/// match, so skipping only changes which header is compared.
pub const SIGNATURE_HEADERS: [&str; 3] = ["X-Hub-Signature-256", "X-Gitlab-Token", "X-Hub-Signature"];

/// Keyed-hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
}

impl DigestAlgorithm {
    fn tag(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }
}

/// How the hex digest is presented in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureFormat {
    /// `algo=hexdigest`
    Prefixed,
    /// bare `hexdigest`
    BareHex,
}

/// Per-provider signature scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureSpec {
    pub algorithm: DigestAlgorithm,
    /// Header the provider natively sends the value in.
    pub header: &'static str,
    pub format: SignatureFormat,
}

impl SignatureSpec {
    pub fn for_provider(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::GitHub => Self {
                algorithm: DigestAlgorithm::Sha256,
                header: "X-Hub-Signature-256",
                format: SignatureFormat::Prefixed,
            },
            ProviderKind::GitLab => Self {
                algorithm: DigestAlgorithm::Sha1,
                header: "X-Gitlab-Token",
                format: SignatureFormat::BareHex,
            },
            ProviderKind::Bitbucket => Self {
                algorithm: DigestAlgorithm::Sha256,
                header: "X-Hub-Signature",
                format: SignatureFormat::BareHex,
            },
        }
    }
}

/// Returns the first present signature header value (see [`SIGNATURE_HEADERS`]).
///
/// Empty or non-UTF-8 values count as absent.
pub fn supplied_signature(headers: &HeaderMap) -> Option<&str> {
    SIGNATURE_HEADERS.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    })
}

/// Computes the header value a genuine `kind` delivery of `body` would carry.
///
/// Returns `None` only if the MAC cannot be keyed, which callers treat as a
/// failed verification.
pub fn expected_signature(body: &[u8], secret: &[u8], kind: ProviderKind) -> Option<String> {
    let spec = SignatureSpec::for_provider(kind);

    let digest = match spec.algorithm {
        DigestAlgorithm::Sha1 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(secret).ok()?;
            mac.update(body);
            hex::encode(mac.finalize().into_bytes())
        }
        DigestAlgorithm::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(secret).ok()?;
            mac.update(body);
            hex::encode(mac.finalize().into_bytes())
        }
    };

    Some(match spec.format {
        SignatureFormat::Prefixed => format!("{}={digest}", spec.algorithm.tag()),
        SignatureFormat::BareHex => digest,
    })
}

/// Verifies `supplied` against the signature expected for `kind`.
///
/// Returns `false` when `supplied` is absent.
pub fn verify(body: &[u8], supplied: Option<&str>, kind: ProviderKind, secret: &[u8]) -> bool {
    let Some(supplied) = supplied else {
        debug!(provider = %kind, "no signature header received");
        return false;
    };

    let Some(expected) = expected_signature(body, secret, kind) else {
        return false;
    };

    debug!(provider = %kind, %expected, received = %supplied, "comparing webhook signatures");

    expected.as_bytes().ct_eq(supplied.as_bytes()).into()
}
