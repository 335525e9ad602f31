//! Server error responses
//!
//! Every error becomes a short plain-text body; the status code is the only
//! machine readable signal.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::reconcile::ReconcileError;
use crate::webhook::WebhookError;

/// Errors surfaced by the webhook endpoints
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("unable to parse webhook event: {0}")]
    Webhook(#[from] WebhookError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Webhook(e) if e.is_unauthorized() => StatusCode::UNAUTHORIZED,
            Self::Webhook(_) => StatusCode::BAD_REQUEST,
            Self::Reconcile(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let response = self.to_string();
        tracing::error!(response = %response, status_code = status.as_u16(), "{}", response);
        (status, response).into_response()
    }
}
