//! Locating the workload a pull request belongs to

use crate::kube::{ResourceStore, StoreError};
use crate::models::{PullRequestEvent, ResourceInstance, ResourceKind};

/// Finds the base instance whose git source matches a pull request
pub struct ResourceMatcher<'a> {
    store: &'a dyn ResourceStore,
}

impl<'a> ResourceMatcher<'a> {
    pub fn new(store: &'a dyn ResourceStore) -> Self {
        Self { store }
    }

    /// List every instance of `kind` and return the first one (by namespace,
    /// then name) tracking the event's repository and target branch
    pub async fn find(
        &self,
        kind: &ResourceKind,
        event: &PullRequestEvent,
    ) -> Result<Option<ResourceInstance>, StoreError> {
        let mut instances = self.store.list(kind).await?;
        tracing::info!("Found {} resources for {}", instances.len(), kind.kind);

        instances.sort_by(|a, b| {
            a.namespace()
                .cmp(b.namespace())
                .then_with(|| a.name().cmp(b.name()))
        });

        Ok(instances.into_iter().find(|instance| matches_event(instance, event)))
    }
}

/// Whether an instance's `spec.source.git` tracks the event's repository and
/// target branch
pub fn matches_event(instance: &ResourceInstance, event: &PullRequestEvent) -> bool {
    let (Some(url), Some(branch)) = (instance.git_url(), instance.git_branch()) else {
        return false;
    };
    same_repository(url, &event.repo_clone_url) && branch == event.target_branch
}

/// Compare clone URLs ignoring one trailing `.git`
pub fn same_repository(a: &str, b: &str) -> bool {
    trim_git_suffix(a) == trim_git_suffix(b)
}

fn trim_git_suffix(url: &str) -> &str {
    url.strip_suffix(".git").unwrap_or(url)
}
