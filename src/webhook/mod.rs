//! Webhook parsing
//!
//! Turns raw provider requests into a [`CanonicalEvent`]. Only pull request
//! hooks carry a payload the reconciler understands; every other hook kind
//! is reported as [`CanonicalEvent::Other`].

pub mod github;
pub mod gitlab;
pub mod signature;

use axum::http::HeaderMap;
use std::fmt;

use crate::models::PullRequestEvent;

pub use github::GitHubParser;
pub use gitlab::GitLabParser;

/// Supported source control providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    GitHub,
    GitLab,
}

impl Provider {
    pub fn all() -> &'static [Self] {
        &[Provider::GitHub, Provider::GitLab]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::GitHub => "github",
            Provider::GitLab => "gitlab",
        }
    }

    /// Environment variable holding the shared secret, e.g. `GITHUB_SHARED_SECRET`
    pub fn secret_env_var(&self) -> String {
        format!("{}_SHARED_SECRET", self.as_str().to_uppercase())
    }

    pub fn parser(&self) -> Box<dyn WebhookParser> {
        match self {
            Provider::GitHub => Box::new(GitHubParser),
            Provider::GitLab => Box::new(GitLabParser),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalEvent {
    PullRequest(PullRequestEvent),
    /// Any hook kind other than pull requests (push, ping, issues, ...)
    Other { kind: String },
}

/// Webhook parsing errors
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("missing {0} header")]
    MissingHeader(&'static str),

    #[error("invalid webhook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("missing webhook signature")]
    MissingSignature,

    #[error("webhook signature does not match")]
    InvalidSignature,
}

impl WebhookError {
    /// Signature problems, as opposed to malformed requests
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            WebhookError::MissingSignature | WebhookError::InvalidSignature
        )
    }
}

/// Provider specific request parser
pub trait WebhookParser: Send + Sync {
    fn provider(&self) -> Provider;

    /// Verify and parse a request. `secret` is `None` when validation is disabled.
    fn parse(
        &self,
        headers: &HeaderMap,
        body: &[u8],
        secret: Option<&str>,
    ) -> Result<CanonicalEvent, WebhookError>;
}

/// Read a header as a string, treating non-UTF-8 values as absent
pub(crate) fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
