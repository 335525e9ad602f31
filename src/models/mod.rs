//! Model layer
//!
//! Types shared by the webhook parsers, the Kubernetes access layer and the
//! reconciliation core.

pub mod event;
pub mod instance;
pub mod resource_kind;

pub use event::{ActionEffect, PullRequestAction, PullRequestEvent};
pub use instance::ResourceInstance;
pub use resource_kind::ResourceKind;
