//! Type catalogs
//!
//! A catalog answers "which resource kinds exist that could be workloads or
//! pull-request variants of workloads". Two sources are supported:
//! - supply chains: each `SupplyChain` object declares the kind it defines in
//!   `spec.defines`
//! - discovery: every served resource tagged with a category (for example
//!   `all-workloads`)

use async_trait::async_trait;
use kube::Client;
use std::sync::Arc;

use super::store::{ResourceStore, StoreError};
use crate::models::instance::nested_value;
use crate::models::{ResourceInstance, ResourceKind};

/// Catalog errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to list supply chains: {0}")]
    SupplyChains(#[source] StoreError),

    #[error("unable to discover API groups: {0}")]
    Discovery(#[source] kube::Error),
}

/// Source of candidate resource kinds
#[async_trait]
pub trait TypeCatalog: Send + Sync {
    async fn list_kinds(&self) -> Result<Vec<ResourceKind>, CatalogError>;
}

/// Catalog reading `spec.defines` from supply chain objects
pub struct SupplyChainCatalog {
    store: Arc<dyn ResourceStore>,
    supply_chain: ResourceKind,
}

impl SupplyChainCatalog {
    pub fn new(store: Arc<dyn ResourceStore>, supply_chain: ResourceKind) -> Self {
        Self {
            store,
            supply_chain,
        }
    }
}

#[async_trait]
impl TypeCatalog for SupplyChainCatalog {
    async fn list_kinds(&self) -> Result<Vec<ResourceKind>, CatalogError> {
        let chains = self
            .store
            .list(&self.supply_chain)
            .await
            .map_err(CatalogError::SupplyChains)?;

        Ok(chains.iter().filter_map(defined_kind).collect())
    }
}

/// Extract the workload kind a supply chain defines
///
/// Returns `None` (and logs) when `spec.defines` is missing any of
/// `group`, `version` or `kind`.
pub fn defined_kind(chain: &ResourceInstance) -> Option<ResourceKind> {
    let field = |name: &str| {
        nested_value(chain.data(), &["spec", "defines", name]).and_then(|v| v.as_str())
    };

    match (field("group"), field("version"), field("kind")) {
        (Some(group), Some(version), Some(kind)) => {
            Some(ResourceKind::from_kind(group, version, kind))
        }
        _ => {
            tracing::warn!(
                "Supply chain {}/{} has an incomplete spec.defines, skipping",
                chain.namespace(),
                chain.name()
            );
            None
        }
    }
}

/// Catalog walking API discovery for resources in a category
pub struct DiscoveryCatalog {
    client: Client,
    category: String,
}

impl DiscoveryCatalog {
    pub fn new(client: Client, category: impl Into<String>) -> Self {
        Self {
            client,
            category: category.into(),
        }
    }
}

#[async_trait]
impl TypeCatalog for DiscoveryCatalog {
    async fn list_kinds(&self) -> Result<Vec<ResourceKind>, CatalogError> {
        let groups = self
            .client
            .list_api_groups()
            .await
            .map_err(CatalogError::Discovery)?;

        let mut kinds = Vec::new();
        for group in groups.groups {
            let Some(version) = group
                .preferred_version
                .as_ref()
                .or_else(|| group.versions.first())
            else {
                continue;
            };

            // a failing group is skipped, the rest are still listed
            let resources = match self
                .client
                .list_api_group_resources(&version.group_version)
                .await
            {
                Ok(resources) => resources,
                Err(e) => {
                    tracing::warn!("Unable to list resources for {}: {}", version.group_version, e);
                    continue;
                }
            };

            for resource in resources.resources {
                if !in_category(&resource.name, resource.categories.as_deref(), &self.category) {
                    continue;
                }
                kinds.push(ResourceKind::new(
                    group.name.clone(),
                    version.version.clone(),
                    resource.name,
                    resource.kind,
                ));
            }
        }

        tracing::debug!("Discovered {} kinds in category {}", kinds.len(), self.category);
        Ok(kinds)
    }
}

/// Subresources (`foo/status`) never qualify
fn in_category(name: &str, categories: Option<&[String]>, category: &str) -> bool {
    !name.contains('/')
        && categories
            .map(|c| c.iter().any(|c| c == category))
            .unwrap_or(false)
}
