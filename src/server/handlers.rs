//! Route handlers

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use super::AppState;
use super::error::ServerError;
use crate::webhook::{CanonicalEvent, Provider};

type TextResponse = (StatusCode, String);

pub async fn github(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<TextResponse, ServerError> {
    handle_hook(&state, Provider::GitHub, &headers, &body).await
}

pub async fn gitlab(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<TextResponse, ServerError> {
    handle_hook(&state, Provider::GitLab, &headers, &body).await
}

pub async fn ready() -> &'static str {
    "ok (ready) handler\n"
}

pub async fn root() -> &'static str {
    "ok (/) handler\n"
}

/// Parse a provider payload and reconcile pull request hooks
async fn handle_hook(
    state: &AppState,
    provider: Provider,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<TextResponse, ServerError> {
    let event = provider
        .parser()
        .parse(headers, body, state.secret(provider))?;

    match event {
        CanonicalEvent::PullRequest(pr) => {
            let outcome = state.engine().reconcile(&pr).await?;
            tracing::debug!("PR-{} reconciled: {:?}", pr.number, outcome);
            Ok(accepted(outcome.to_string()))
        }
        CanonicalEvent::Other { kind } => {
            tracing::info!("Unhandled {} webhook '{}'", provider, kind);
            Ok(accepted("Webhook Accepted".to_string()))
        }
    }
}

fn accepted(response: String) -> TextResponse {
    let status = StatusCode::ACCEPTED;
    tracing::info!(response = %response, status_code = status.as_u16(), "{}", response);
    (status, response)
}
