//! pr-controller library
//!
//! Reconciles pull request webhooks against dynamically typed workload
//! resources. Used by the `pr-controller` binary and by the integration tests.

pub mod cli;
pub mod config;
pub mod kube;
pub mod models;
pub mod reconcile;
pub mod server;
pub mod webhook;

// Re-export commonly used types for convenience
pub use models::{PullRequestAction, PullRequestEvent, ResourceInstance, ResourceKind};
pub use reconcile::{ReconcileEngine, ReconcileError, ReconcileOutcome};
pub use webhook::{CanonicalEvent, Provider};
