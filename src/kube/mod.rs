//! Kubernetes access module
//!
//! Builds the cluster client once at startup and provides the two seams the
//! reconciliation core talks to:
//! - [`ResourceStore`]: list/get/create/update/delete of dynamic objects
//! - [`TypeCatalog`]: the set of resource kinds considered for pairing

pub mod catalog;
pub mod store;

pub use catalog::{CatalogError, DiscoveryCatalog, SupplyChainCatalog, TypeCatalog};
pub use store::{KubeStore, ResourceStore, StoreError, StoreOperation};

use anyhow::{Context, Result};
use kube::{Client, Config};

/// Initialize and return a Kubernetes client
///
/// Uses the default kubeconfig loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client() -> Result<Client> {
    let config = Config::infer()
        .await
        .context("Unable to load Kubernetes config")?;

    tracing::debug!("Using Kubernetes API server at {}", config.cluster_url);

    Client::try_from(config).context("Unable to build Kubernetes client")
}
