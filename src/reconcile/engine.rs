//! Reconciliation pass
//!
//! One pass per inbound pull request event:
//! 1. list candidate kinds from the type catalog and pair them
//! 2. for each base kind, find the workload tracking the PR's repo/branch
//! 3. on the first match with a handled action, upsert or delete the variant
//!
//! At most one base/variant pair is mutated per event. A store error aborts
//! the pass; mutations applied before the error are not rolled back.

use std::fmt;
use std::sync::Arc;

use crate::kube::{CatalogError, ResourceStore, StoreError, TypeCatalog};
use crate::models::{ActionEffect, PullRequestEvent, ResourceInstance, ResourceKind};

use super::matcher::ResourceMatcher;
use super::pairing::{PairingStrategy, SuffixPairing};
use super::projector::project;

/// Reconciliation errors
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a successful pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A new variant instance was created
    Created { kind: String, namespace: String, name: String },
    /// The existing variant's git branch/commit were refreshed
    Updated { kind: String, namespace: String, name: String },
    /// The variant instance was deleted
    Deleted { kind: String, namespace: String, name: String },
    /// Remove action, but the variant did not exist
    AlreadyAbsent { kind: String, namespace: String, name: String },
    /// A workload matched but the action is not one we act on
    Skipped { action: String },
    /// No workload tracks this repository and branch
    NoMatch,
}

impl ReconcileOutcome {
    /// Whether the pass changed anything in the cluster
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ReconcileOutcome::Created { .. }
                | ReconcileOutcome::Updated { .. }
                | ReconcileOutcome::Deleted { .. }
        )
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileOutcome::Created { .. } => f.write_str("Resource Created"),
            ReconcileOutcome::Updated { .. } => f.write_str("Resource Updated"),
            ReconcileOutcome::Deleted { .. } | ReconcileOutcome::AlreadyAbsent { .. } => {
                f.write_str("Resource Deleted")
            }
            ReconcileOutcome::Skipped { .. } | ReconcileOutcome::NoMatch => {
                f.write_str("PR Accepted")
            }
        }
    }
}

/// Drives reconciliation of pull request events against the cluster
#[derive(Clone)]
pub struct ReconcileEngine {
    store: Arc<dyn ResourceStore>,
    catalog: Arc<dyn TypeCatalog>,
    pairing: Arc<dyn PairingStrategy>,
}

impl ReconcileEngine {
    /// Engine using the default suffix pairing
    pub fn new(store: Arc<dyn ResourceStore>, catalog: Arc<dyn TypeCatalog>) -> Self {
        Self::with_pairing(store, catalog, Arc::new(SuffixPairing))
    }

    pub fn with_pairing(
        store: Arc<dyn ResourceStore>,
        catalog: Arc<dyn TypeCatalog>,
        pairing: Arc<dyn PairingStrategy>,
    ) -> Self {
        Self {
            store,
            catalog,
            pairing,
        }
    }

    /// Run one reconciliation pass for `event`
    pub async fn reconcile(
        &self,
        event: &PullRequestEvent,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        tracing::info!("handling {} for PR-{}", event.action, event.number);
        tracing::debug!("{:?}", event);

        let kinds = self.catalog.list_kinds().await?;
        let mapping = self.pairing.resolve(&kinds);
        tracing::debug!("mapped kinds {:?}", mapping);

        tracing::info!(
            "searching for resources for git url {} and target branch {}",
            event.repo_clone_url.trim_end_matches(".git"),
            event.target_branch
        );

        let matcher = ResourceMatcher::new(self.store.as_ref());
        let mut outcome = ReconcileOutcome::NoMatch;

        for (base, variant) in &mapping {
            tracing::info!("{} -> {}", base.kind, variant.kind);

            let Some(workload) = matcher.find(base, event).await? else {
                tracing::info!(
                    "couldn't find a matching {} resource for PR-{}",
                    base.kind,
                    event.number
                );
                continue;
            };

            tracing::info!(
                "Found matching {} {}/{} for url {}",
                base.kind,
                workload.namespace(),
                workload.name(),
                workload.git_url().unwrap_or_default()
            );

            let desired = project(&workload, variant, event);
            match event.action.effect() {
                ActionEffect::Upsert => return Ok(self.create_or_update(variant, desired).await?),
                ActionEffect::Remove => return Ok(self.delete_if_exists(variant, desired).await?),
                ActionEffect::Skip => {
                    tracing::warn!("unhandled action {}", event.action);
                    outcome = ReconcileOutcome::Skipped {
                        action: event.action.to_string(),
                    };
                }
            }
        }

        Ok(outcome)
    }

    /// Create the variant, or refresh only its git branch and commit when it
    /// already exists
    async fn create_or_update(
        &self,
        variant: &ResourceKind,
        desired: ResourceInstance,
    ) -> Result<ReconcileOutcome, StoreError> {
        tracing::info!("CreateOrUpdate handler: {}", desired.name());

        let existing = self
            .store
            .get(variant, desired.namespace(), desired.name())
            .await?;

        let Some(mut existing) = existing else {
            tracing::info!("Creating new resource: {}/{}", desired.namespace(), desired.name());
            let created = self.store.create(variant, &desired).await.inspect_err(|e| {
                tracing::error!("{}", e);
            })?;
            tracing::info!("Created new resource: {}", created.name());
            return Ok(ReconcileOutcome::Created {
                kind: variant.kind.clone(),
                namespace: created.namespace().to_string(),
                name: created.name().to_string(),
            });
        };

        tracing::info!("Updating resource: {}", existing.name());
        if let Some(branch) = desired.git_branch() {
            existing.set_git_branch(branch);
        }
        if let Some(commit) = desired.git_commit() {
            existing.set_git_commit(commit);
        }

        let updated = self.store.update(variant, &existing).await.inspect_err(|e| {
            tracing::error!("{}", e);
        })?;
        Ok(ReconcileOutcome::Updated {
            kind: variant.kind.clone(),
            namespace: updated.namespace().to_string(),
            name: updated.name().to_string(),
        })
    }

    async fn delete_if_exists(
        &self,
        variant: &ResourceKind,
        desired: ResourceInstance,
    ) -> Result<ReconcileOutcome, StoreError> {
        tracing::info!("Delete handler: {}", desired.name());

        let namespace = desired.namespace().to_string();
        let name = desired.name().to_string();

        if self.store.get(variant, &namespace, &name).await?.is_none() {
            tracing::info!("{}/{} does not exist, nothing to delete", namespace, name);
            return Ok(ReconcileOutcome::AlreadyAbsent {
                kind: variant.kind.clone(),
                namespace,
                name,
            });
        }

        tracing::info!("Deleting resource: {}", name);
        self.store
            .delete(variant, &namespace, &name)
            .await
            .inspect_err(|e| tracing::error!("{}", e))?;
        tracing::info!("Deleted resource: {}", name);

        Ok(ReconcileOutcome::Deleted {
            kind: variant.kind.clone(),
            namespace,
            name,
        })
    }
}
