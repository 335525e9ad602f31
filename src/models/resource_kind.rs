//! Resource kind definitions
//!
//! A `ResourceKind` identifies one served resource type in the cluster by
//! group, version, plural resource name and kind. Kinds are discovered at
//! runtime, never hardcoded.

use kube::core::ApiResource;
use std::fmt;

/// Group/version/resource/kind of a served resource type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKind {
    pub group: String,
    pub version: String,
    /// Plural lowercase form of `kind` (e.g. "carvelpackages")
    pub resource: String,
    pub kind: String,
}

impl ResourceKind {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        resource: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
            kind: kind.into(),
        }
    }

    /// Build a kind from its `kind` name, deriving the plural resource name
    /// by lowercasing and appending "s".
    pub fn from_kind(group: &str, version: &str, kind: &str) -> Self {
        Self::new(group, version, format!("{}s", kind).to_lowercase(), kind)
    }

    /// The `apiVersion` string objects of this kind carry
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Convert into the kube-rs dynamic API descriptor
    pub fn to_api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group.clone(),
            version: self.version.clone(),
            api_version: self.api_version(),
            kind: self.kind.clone(),
            plural: self.resource.clone(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}/{}", self.version, self.resource)
        } else {
            write!(f, "{}.{}/{}", self.resource, self.group, self.version)
        }
    }
}
