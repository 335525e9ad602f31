//! GitHub webhooks
//!
//! The hook kind comes from `X-GitHub-Event`; payloads are signed with
//! `X-Hub-Signature-256` when a shared secret is configured.

use axum::http::HeaderMap;
use serde::Deserialize;

use super::signature::verify_sha256;
use super::{CanonicalEvent, Provider, WebhookError, WebhookParser, header};
use crate::models::{PullRequestAction, PullRequestEvent};

pub const EVENT_HEADER: &str = "X-GitHub-Event";
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

#[derive(Debug, Deserialize)]
struct PullRequestHook {
    action: String,
    number: u64,
    pull_request: PullRequest,
    repository: Repository,
}

#[derive(Debug, Deserialize)]
struct PullRequest {
    #[serde(default)]
    merged: bool,
    head: GitRef,
    base: GitRef,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    #[serde(rename = "ref")]
    git_ref: String,
    sha: String,
}

#[derive(Debug, Deserialize)]
struct Repository {
    clone_url: String,
}

/// Parser for GitHub webhooks
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHubParser;

impl WebhookParser for GitHubParser {
    fn provider(&self) -> Provider {
        Provider::GitHub
    }

    fn parse(
        &self,
        headers: &HeaderMap,
        body: &[u8],
        secret: Option<&str>,
    ) -> Result<CanonicalEvent, WebhookError> {
        let kind = header(headers, EVENT_HEADER).ok_or(WebhookError::MissingHeader(EVENT_HEADER))?;

        if let Some(secret) = secret {
            let signature =
                header(headers, SIGNATURE_HEADER).ok_or(WebhookError::MissingSignature)?;
            if !verify_sha256(secret, body, signature) {
                return Err(WebhookError::InvalidSignature);
            }
        }

        if kind != "pull_request" {
            return Ok(CanonicalEvent::Other {
                kind: kind.to_string(),
            });
        }

        let hook: PullRequestHook = serde_json::from_slice(body)?;
        Ok(CanonicalEvent::PullRequest(PullRequestEvent {
            action: map_action(&hook.action, hook.pull_request.merged),
            repo_clone_url: hook.repository.clone_url,
            target_branch: hook.pull_request.base.git_ref,
            head_ref: hook.pull_request.head.git_ref,
            head_sha: hook.pull_request.head.sha,
            number: hook.number,
        }))
    }
}

/// GitHub reports merges as `closed` with `merged: true`
fn map_action(action: &str, merged: bool) -> PullRequestAction {
    match action {
        "opened" => PullRequestAction::Opened,
        "reopened" => PullRequestAction::Reopened,
        "synchronize" | "edited" => PullRequestAction::Updated,
        "closed" if merged => PullRequestAction::Merged,
        "closed" => PullRequestAction::Closed,
        other => PullRequestAction::Other(other.to_string()),
    }
}
