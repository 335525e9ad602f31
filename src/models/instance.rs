//! Schema-agnostic resource instances
//!
//! Workload resources are custom resources with arbitrary schemas. The only
//! part of the document this controller reads or writes is the git source at
//! `spec.source.git`, so instances are kept as dynamic objects with typed
//! accessors for those paths.

use kube::ResourceExt;
use kube::core::{DynamicObject, ObjectMeta, TypeMeta};
use serde_json::{Map, Value};

use super::ResourceKind;

const GIT_SOURCE_PATH: [&str; 3] = ["spec", "source", "git"];

/// One object held in the cluster
#[derive(Debug, Clone)]
pub struct ResourceInstance(DynamicObject);

impl ResourceInstance {
    /// Create an empty instance of `kind` with the given identity
    pub fn new(api_version: &str, kind: &str, namespace: &str, name: &str) -> Self {
        Self(DynamicObject {
            types: Some(TypeMeta {
                api_version: api_version.to_string(),
                kind: kind.to_string(),
            }),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..ObjectMeta::default()
            },
            data: Value::Object(Map::new()),
        })
    }

    /// Parse a full JSON document (`apiVersion`, `kind`, `metadata`, ...)
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value).map(Self)
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.0)
    }

    pub fn api_version(&self) -> &str {
        self.0
            .types
            .as_ref()
            .map(|t| t.api_version.as_str())
            .unwrap_or_default()
    }

    pub fn kind(&self) -> &str {
        self.0
            .types
            .as_ref()
            .map(|t| t.kind.as_str())
            .unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.0.metadata.name.as_deref().unwrap_or_default()
    }

    pub fn namespace(&self) -> &str {
        self.0.metadata.namespace.as_deref().unwrap_or_default()
    }

    /// Whether this instance is of the given kind (matches API group and kind name)
    pub fn is_kind(&self, kind: &ResourceKind) -> bool {
        self.kind() == kind.kind && self.api_version() == kind.api_version()
    }

    /// Everything outside `apiVersion`, `kind` and `metadata`
    pub fn data(&self) -> &Value {
        &self.0.data
    }

    pub fn metadata(&self) -> &ObjectMeta {
        &self.0.metadata
    }

    pub fn git_url(&self) -> Option<&str> {
        self.git_field("url")
    }

    pub fn git_branch(&self) -> Option<&str> {
        self.git_field("branch")
    }

    pub fn git_commit(&self) -> Option<&str> {
        self.git_field("commit")
    }

    pub fn set_git_url(&mut self, url: &str) {
        self.set_git_field("url", url);
    }

    pub fn set_git_branch(&mut self, branch: &str) {
        self.set_git_field("branch", branch);
    }

    pub fn set_git_commit(&mut self, commit: &str) {
        self.set_git_field("commit", commit);
    }

    fn git_field(&self, field: &str) -> Option<&str> {
        let mut path = GIT_SOURCE_PATH.to_vec();
        path.push(field);
        nested_value(&self.0.data, &path).and_then(Value::as_str)
    }

    fn set_git_field(&mut self, field: &str, value: &str) {
        let mut path = GIT_SOURCE_PATH.to_vec();
        path.push(field);
        set_nested_value(&mut self.0.data, &path, Value::String(value.to_string()));
    }

    pub fn as_dynamic(&self) -> &DynamicObject {
        &self.0
    }

    pub fn into_dynamic(self) -> DynamicObject {
        self.0
    }
}

impl From<DynamicObject> for ResourceInstance {
    fn from(obj: DynamicObject) -> Self {
        Self(obj)
    }
}

/// Human readable `namespace/name` label used in logs
pub fn object_ref(obj: &DynamicObject) -> String {
    match obj.namespace() {
        Some(ns) => format!("{}/{}", ns, obj.name_any()),
        None => obj.name_any(),
    }
}

/// Walk a path of object keys
pub fn nested_value<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Set a value at a path of object keys, creating (or replacing non-object)
/// intermediate nodes as needed
pub fn set_nested_value(value: &mut Value, path: &[&str], new_value: Value) {
    let Some((last, parents)) = path.split_last() else {
        *value = new_value;
        return;
    };

    let mut current = value;
    for key in parents {
        current = ensure_object(current)
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    ensure_object(current).insert(last.to_string(), new_value);
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    let Value::Object(map) = value else {
        unreachable!("replaced with an object above")
    };
    map
}
