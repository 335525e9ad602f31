//! Shared fixtures for integration tests
//!
//! Provides an in-memory `ResourceStore`, mockall mocks for the catalog and
//! store seams, and builders for workload instances and pull request events.

#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Mutex;

use pr_controller::kube::{CatalogError, ResourceStore, StoreError, StoreOperation, TypeCatalog};
use pr_controller::{PullRequestAction, PullRequestEvent, ResourceInstance, ResourceKind};

pub const REPO_URL: &str = "https://github.com/acme/go-scm.git";
pub const HEAD_SHA: &str = "4f2a9c1e";

mock! {
    pub Catalog {}

    #[async_trait]
    impl TypeCatalog for Catalog {
        async fn list_kinds(&self) -> Result<Vec<ResourceKind>, CatalogError>;
    }
}

mock! {
    pub Store {}

    #[async_trait]
    impl ResourceStore for Store {
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
        async fn update(
            &self,
            kind: &ResourceKind,
            instance: &ResourceInstance,
        ) -> Result<ResourceInstance, StoreError>;
        async fn delete(
            &self,
            kind: &ResourceKind,
            namespace: &str,
            name: &str,
        ) -> Result<(), StoreError>;
    }
}

/// Catalog mock returning `kinds` on every call
pub fn catalog_of(kinds: Vec<ResourceKind>) -> MockCatalog {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_list_kinds()
        .returning(move || Ok(kinds.clone()));
    catalog
}

/// Mutating call recorded by [`InMemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create { kind: String, namespace: String, name: String },
    Update { kind: String, namespace: String, name: String },
    Delete { kind: String, namespace: String, name: String },
}

type Key = (String, String, String);

/// `ResourceStore` holding objects in memory, keyed by kind/namespace/name
#[derive(Default)]
pub struct InMemoryStore {
    objects: Mutex<BTreeMap<Key, ResourceInstance>>,
    mutations: Mutex<Vec<Mutation>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object without recording a mutation
    pub fn insert(&self, kind: &ResourceKind, instance: ResourceInstance) {
        let key = key(kind, instance.namespace(), instance.name());
        self.objects.lock().unwrap().insert(key, instance);
    }

    pub fn object(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Option<ResourceInstance> {
        self.objects
            .lock()
            .unwrap()
            .get(&key(kind, namespace, name))
            .cloned()
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().unwrap().clone()
    }

    fn record(&self, mutation: Mutation) {
        self.mutations.lock().unwrap().push(mutation);
    }
}

fn key(kind: &ResourceKind, namespace: &str, name: &str) -> Key {
    (kind.to_string(), namespace.to_string(), name.to_string())
}

fn backend_error(
    operation: StoreOperation,
    kind: &ResourceKind,
    namespace: &str,
    name: &str,
    message: &str,
) -> StoreError {
    StoreError::Backend {
        operation,
        target: format!("{} {}/{}", kind.kind, namespace, name),
        message: message.to_string(),
    }
}

#[async_trait]
impl ResourceStore for InMemoryStore {
    async fn list(&self, kind: &ResourceKind) -> Result<Vec<ResourceInstance>, StoreError> {
        let prefix = kind.to_string();
        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .filter(|((k, _, _), _)| *k == prefix)
            .map(|(_, instance)| instance.clone())
            .collect())
    }

    async fn get(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ResourceInstance>, StoreError> {
        Ok(self.object(kind, namespace, name))
    }

    async fn create(
        &self,
        kind: &ResourceKind,
        instance: &ResourceInstance,
    ) -> Result<ResourceInstance, StoreError> {
        let (namespace, name) = (instance.namespace(), instance.name());
        let mut objects = self.objects.lock().unwrap();
        let key = key(kind, namespace, name);
        if objects.contains_key(&key) {
            let message = "already exists";
            return Err(backend_error(StoreOperation::Create, kind, namespace, name, message));
        }
        objects.insert(key, instance.clone());
        drop(objects);

        self.record(Mutation::Create {
            kind: kind.kind.clone(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        Ok(instance.clone())
    }

    async fn update(
        &self,
        kind: &ResourceKind,
        instance: &ResourceInstance,
    ) -> Result<ResourceInstance, StoreError> {
        let (namespace, name) = (instance.namespace(), instance.name());
        let mut objects = self.objects.lock().unwrap();
        let key = key(kind, namespace, name);
        if !objects.contains_key(&key) {
            let message = "not found";
            return Err(backend_error(StoreOperation::Update, kind, namespace, name, message));
        }
        objects.insert(key, instance.clone());
        drop(objects);

        self.record(Mutation::Update {
            kind: kind.kind.clone(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        Ok(instance.clone())
    }

    async fn delete(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        let removed = self
            .objects
            .lock()
            .unwrap()
            .remove(&key(kind, namespace, name));
        if removed.is_none() {
            return Err(backend_error(StoreOperation::Delete, kind, namespace, name, "not found"));
        }

        self.record(Mutation::Delete {
            kind: kind.kind.clone(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        Ok(())
    }
}

pub fn carvel_package_kind() -> ResourceKind {
    ResourceKind::new("carto.run", "v1alpha1", "carvelpackages", "CarvelPackage")
}

pub fn carvel_package_pr_kind() -> ResourceKind {
    ResourceKind::new("carto.run", "v1alpha1", "carvelpackageprs", "CarvelPackagePR")
}

pub fn example_kind() -> ResourceKind {
    ResourceKind::new("example.com", "v1", "examples", "Example")
}

pub fn example_pr_kind() -> ResourceKind {
    ResourceKind::new("example.com", "v1", "examplepullrequests", "ExamplePullRequest")
}

/// A workload of `kind` tracking `url`@`branch`, with an extra non-git field
pub fn workload(
    kind: &ResourceKind,
    namespace: &str,
    name: &str,
    url: &str,
    branch: &str,
) -> ResourceInstance {
    ResourceInstance::from_value(json!({
        "apiVersion": kind.api_version(),
        "kind": kind.kind,
        "metadata": { "name": name, "namespace": namespace },
        "spec": {
            "source": { "git": { "url": url, "branch": branch } },
            "params": [{ "name": "image", "value": "registry.local/go-scm" }]
        }
    }))
    .unwrap()
}

pub fn pr_event(action: PullRequestAction, number: u64) -> PullRequestEvent {
    PullRequestEvent {
        action,
        repo_clone_url: REPO_URL.to_string(),
        target_branch: "main".to_string(),
        head_ref: "feature/login".to_string(),
        head_sha: HEAD_SHA.to_string(),
        number,
    }
}

/// GitHub `pull_request` webhook body
pub fn github_pull_request(action: &str, number: u64, merged: bool) -> Value {
    json!({
        "action": action,
        "number": number,
        "pull_request": {
            "number": number,
            "merged": merged,
            "head": { "ref": "feature/login", "sha": HEAD_SHA },
            "base": { "ref": "main", "sha": "0b1c2d3e" }
        },
        "repository": {
            "full_name": "acme/go-scm",
            "clone_url": REPO_URL
        }
    })
}

/// GitLab `Merge Request Hook` body
pub fn gitlab_merge_request(action: &str, iid: u64) -> Value {
    json!({
        "object_kind": "merge_request",
        "project": {
            "path_with_namespace": "acme/go-scm",
            "git_http_url": REPO_URL
        },
        "object_attributes": {
            "iid": iid,
            "action": action,
            "source_branch": "feature/login",
            "target_branch": "main",
            "last_commit": { "id": HEAD_SHA }
        }
    })
}
