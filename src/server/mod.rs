//! HTTP server
//!
//! | Route     | Method | Behavior                                   |
//! |-----------|--------|--------------------------------------------|
//! | `/github` | POST   | GitHub webhook → reconcile pull requests   |
//! | `/gitlab` | POST   | GitLab webhook → reconcile merge requests  |
//! | `/ready`  | GET    | readiness                                  |
//! | `/`       | GET    | liveness                                   |

pub mod error;
pub mod handlers;

pub use error::ServerError;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::reconcile::ReconcileEngine;
use crate::webhook::Provider;

/// Shared state handed to every request
#[derive(Clone)]
pub struct AppState {
    engine: Arc<ReconcileEngine>,
    secrets: Arc<HashMap<Provider, String>>,
}

impl AppState {
    /// State without any shared secrets (signature validation disabled)
    pub fn new(engine: ReconcileEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            secrets: Arc::new(HashMap::new()),
        }
    }

    /// State with secrets read from `{PROVIDER}_SHARED_SECRET`
    pub fn from_env(engine: ReconcileEngine) -> Self {
        let mut state = Self::new(engine);
        for provider in Provider::all() {
            match std::env::var(provider.secret_env_var()) {
                Ok(secret) if !secret.is_empty() => {
                    tracing::info!("{} secret is set", provider.secret_env_var());
                    state = state.with_secret(*provider, secret);
                }
                _ => tracing::info!(
                    "{} is not set, {} payloads will not be validated",
                    provider.secret_env_var(),
                    provider
                ),
            }
        }
        state
    }

    pub fn with_secret(mut self, provider: Provider, secret: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.secrets).insert(provider, secret.into());
        self
    }

    pub fn engine(&self) -> &ReconcileEngine {
        &self.engine
    }

    pub fn secret(&self, provider: Provider) -> Option<&str> {
        self.secrets.get(&provider).map(String::as_str)
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/github", post(handlers::github))
        .route("/gitlab", post(handlers::gitlab))
        .route("/ready", get(handlers::ready))
        .route("/", get(handlers::root))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let address = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!("listening on {}", address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Unable to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
