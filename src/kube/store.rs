//! Resource store backed by the Kubernetes dynamic API

use async_trait::async_trait;
use kube::api::{Api, DeleteParams, ListParams, PostParams};
use kube::core::DynamicObject;
use kube::Client;
use std::fmt;

use crate::models::instance::object_ref;
use crate::models::{ResourceInstance, ResourceKind};

/// Store operation that failed, used for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StoreOperation::List => "list",
            StoreOperation::Get => "get",
            StoreOperation::Create => "create",
            StoreOperation::Update => "update",
            StoreOperation::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// Resource store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unable to {operation} {target}: {source}")]
    Kube {
        operation: StoreOperation,
        target: String,
        #[source]
        source: kube::Error,
    },

    #[error("unable to {operation} {target}: {message}")]
    Backend {
        operation: StoreOperation,
        target: String,
        message: String,
    },
}

impl StoreError {
    pub fn operation(&self) -> StoreOperation {
        match self {
            StoreError::Kube { operation, .. } | StoreError::Backend { operation, .. } => {
                *operation
            }
        }
    }
}

/// Access to resource instances of arbitrary kinds
///
/// `get` distinguishes "absent" (`Ok(None)`) from a failed read (`Err`).
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// List all instances of `kind` across namespaces
    async fn list(&self, kind: &ResourceKind) -> Result<Vec<ResourceInstance>, StoreError>;

    async fn get(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ResourceInstance>, StoreError>;

    async fn create(
        &self,
        kind: &ResourceKind,
        instance: &ResourceInstance,
    ) -> Result<ResourceInstance, StoreError>;

    /// Replace an existing instance; `instance` carries the fetched resourceVersion
    async fn update(
        &self,
        kind: &ResourceKind,
        instance: &ResourceInstance,
    ) -> Result<ResourceInstance, StoreError>;

    async fn delete(&self, kind: &ResourceKind, namespace: &str, name: &str)
    -> Result<(), StoreError>;
}

/// [`ResourceStore`] talking to the cluster through `Api<DynamicObject>`
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, kind: &ResourceKind, namespace: &str) -> Api<DynamicObject> {
        let api_resource = kind.to_api_resource();
        if namespace.is_empty() {
            Api::all_with(self.client.clone(), &api_resource)
        } else {
            Api::namespaced_with(self.client.clone(), namespace, &api_resource)
        }
    }
}

fn target(kind: &ResourceKind, namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        format!("{} {}", kind.kind, name)
    } else {
        format!("{} {}/{}", kind.kind, namespace, name)
    }
}

#[async_trait]
impl ResourceStore for KubeStore {
    async fn list(&self, kind: &ResourceKind) -> Result<Vec<ResourceInstance>, StoreError> {
        let list = self
            .api(kind, "")
            .list(&ListParams::default())
            .await
            .map_err(|source| StoreError::Kube {
                operation: StoreOperation::List,
                target: kind.to_string(),
                source,
            })?;

        tracing::debug!("Listed {} {} objects", list.items.len(), kind.kind);
        Ok(list.items.into_iter().map(ResourceInstance::from).collect())
    }

    async fn get(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ResourceInstance>, StoreError> {
        self.api(kind, namespace)
            .get_opt(name)
            .await
            .map(|obj| obj.map(ResourceInstance::from))
            .map_err(|source| StoreError::Kube {
                operation: StoreOperation::Get,
                target: target(kind, namespace, name),
                source,
            })
    }

    async fn create(
        &self,
        kind: &ResourceKind,
        instance: &ResourceInstance,
    ) -> Result<ResourceInstance, StoreError> {
        let created = self
            .api(kind, instance.namespace())
            .create(&PostParams::default(), instance.as_dynamic())
            .await
            .map_err(|source| StoreError::Kube {
                operation: StoreOperation::Create,
                target: target(kind, instance.namespace(), instance.name()),
                source,
            })?;

        tracing::debug!("Created {} {}", kind.kind, object_ref(&created));
        Ok(created.into())
    }

    async fn update(
        &self,
        kind: &ResourceKind,
        instance: &ResourceInstance,
    ) -> Result<ResourceInstance, StoreError> {
        let updated = self
            .api(kind, instance.namespace())
            .replace(instance.name(), &PostParams::default(), instance.as_dynamic())
            .await
            .map_err(|source| StoreError::Kube {
                operation: StoreOperation::Update,
                target: target(kind, instance.namespace(), instance.name()),
                source,
            })?;

        tracing::debug!("Updated {} {}", kind.kind, object_ref(&updated));
        Ok(updated.into())
    }

    async fn delete(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        self.api(kind, namespace)
            .delete(name, &DeleteParams::default())
            .await
            .map(|_| ())
            .map_err(|source| StoreError::Kube {
                operation: StoreOperation::Delete,
                target: target(kind, namespace, name),
                source,
            })
    }
}
