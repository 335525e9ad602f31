//! GitLab webhooks
//!
//! GitLab does not sign payloads; it echoes the configured secret in
//! `X-Gitlab-Token`.

use axum::http::HeaderMap;
use serde::Deserialize;

use super::signature::tokens_match;
use super::{CanonicalEvent, Provider, WebhookError, WebhookParser, header};
use crate::models::{PullRequestAction, PullRequestEvent};

pub const EVENT_HEADER: &str = "X-Gitlab-Event";
pub const TOKEN_HEADER: &str = "X-Gitlab-Token";
pub const MERGE_REQUEST_EVENT: &str = "Merge Request Hook";

#[derive(Debug, Deserialize)]
struct MergeRequestHook {
    project: Project,
    object_attributes: ObjectAttributes,
}

#[derive(Debug, Deserialize)]
struct Project {
    git_http_url: String,
}

#[derive(Debug, Deserialize)]
struct ObjectAttributes {
    iid: u64,
    #[serde(default)]
    action: Option<String>,
    source_branch: String,
    target_branch: String,
    last_commit: Commit,
}

#[derive(Debug, Deserialize)]
struct Commit {
    id: String,
}

/// Parser for GitLab webhooks
#[derive(Debug, Clone, Copy, Default)]
pub struct GitLabParser;

impl WebhookParser for GitLabParser {
    fn provider(&self) -> Provider {
        Provider::GitLab
    }

    fn parse(
        &self,
        headers: &HeaderMap,
        body: &[u8],
        secret: Option<&str>,
    ) -> Result<CanonicalEvent, WebhookError> {
        let kind = header(headers, EVENT_HEADER).ok_or(WebhookError::MissingHeader(EVENT_HEADER))?;

        if let Some(secret) = secret {
            let token = header(headers, TOKEN_HEADER).ok_or(WebhookError::MissingSignature)?;
            if !tokens_match(secret, token) {
                return Err(WebhookError::InvalidSignature);
            }
        }

        if kind != MERGE_REQUEST_EVENT {
            return Ok(CanonicalEvent::Other {
                kind: kind.to_string(),
            });
        }

        let hook: MergeRequestHook = serde_json::from_slice(body)?;
        let attrs = hook.object_attributes;
        Ok(CanonicalEvent::PullRequest(PullRequestEvent {
            action: map_action(attrs.action.as_deref().unwrap_or_default()),
            repo_clone_url: hook.project.git_http_url,
            target_branch: attrs.target_branch,
            head_ref: attrs.source_branch,
            head_sha: attrs.last_commit.id,
            number: attrs.iid,
        }))
    }
}

fn map_action(action: &str) -> PullRequestAction {
    match action {
        "open" => PullRequestAction::Opened,
        "reopen" => PullRequestAction::Reopened,
        "update" => PullRequestAction::Updated,
        "merge" => PullRequestAction::Merged,
        "close" => PullRequestAction::Closed,
        other => PullRequestAction::Other(other.to_string()),
    }
}
