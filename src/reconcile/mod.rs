//! Reconciliation core
//!
//! Maps pull request events onto pull-request scoped copies of workload
//! resources:
//! - `pairing`: which kinds are workloads and which are their PR variants
//! - `matcher`: which workload instance a PR belongs to
//! - `projector`: what the PR variant instance should look like
//! - `engine`: the end-to-end pass

pub mod engine;
pub mod matcher;
pub mod pairing;
pub mod projector;

pub use engine::{ReconcileEngine, ReconcileError, ReconcileOutcome};
pub use matcher::{ResourceMatcher, same_repository};
pub use pairing::{BaseToVariantMapping, PairingStrategy, SuffixPairing, is_variant};
pub use projector::{project, variant_name};
