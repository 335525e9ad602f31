//! Projection of a workload into its pull request variant

use crate::models::{PullRequestEvent, ResourceInstance, ResourceKind};

/// Name of the variant instance for a base instance and PR number
pub fn variant_name(base_name: &str, number: u64) -> String {
    format!("{}-pr-{}", base_name, number)
}

/// Build the desired (not yet persisted) variant instance
///
/// The variant lives next to the base instance and points its git source at
/// the pull request head.
pub fn project(
    base: &ResourceInstance,
    variant: &ResourceKind,
    event: &PullRequestEvent,
) -> ResourceInstance {
    let mut desired = ResourceInstance::new(
        base.api_version(),
        &variant.kind,
        base.namespace(),
        &variant_name(base.name(), event.number),
    );
    desired.set_git_url(&event.repo_clone_url);
    desired.set_git_branch(&event.head_ref);
    desired.set_git_commit(&event.head_sha);
    desired
}
