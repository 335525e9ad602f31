//! Base/variant kind pairing
//!
//! Workload kinds (e.g. `carvelpackages`) have pull request counterparts
//! (e.g. `carvelpackageprs` or `carvelpackagepullrequests`) in the same API
//! group. Pairing is a strategy so the naming heuristic can be swapped out.

use std::collections::BTreeMap;

use crate::models::ResourceKind;

/// Resource name suffixes marking a pull request variant kind
pub const VARIANT_SUFFIXES: &[&str] = &["prs", "pullrequests"];

/// Base kind → pull request variant kind
pub type BaseToVariantMapping = BTreeMap<ResourceKind, ResourceKind>;

/// Strategy computing which kinds pair up
pub trait PairingStrategy: Send + Sync {
    fn resolve(&self, kinds: &[ResourceKind]) -> BaseToVariantMapping;
}

/// Pairs kinds by resource name suffix within an API group
///
/// Kinds are considered in ascending order, so when several variants would
/// fit a base the lexicographically smallest one wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixPairing;

impl PairingStrategy for SuffixPairing {
    fn resolve(&self, kinds: &[ResourceKind]) -> BaseToVariantMapping {
        let mut sorted: Vec<&ResourceKind> = kinds.iter().collect();
        sorted.sort();
        sorted.dedup();

        let mut mapping = BaseToVariantMapping::new();
        for base in sorted.iter().filter(|k| !is_variant(k)) {
            let variant = sorted.iter().find(|candidate| {
                candidate.group == base.group
                    && is_variant(candidate)
                    && strip_plural_suffix(&base.resource) == strip_variant_suffix(&candidate.resource)
            });

            if let Some(variant) = variant {
                mapping.insert((*base).clone(), (*variant).clone());
            }
        }
        mapping
    }
}

/// Whether a kind is a pull request variant
pub fn is_variant(kind: &ResourceKind) -> bool {
    VARIANT_SUFFIXES
        .iter()
        .any(|suffix| kind.resource.ends_with(suffix))
}

fn strip_plural_suffix(resource: &str) -> &str {
    resource.strip_suffix('s').unwrap_or(resource)
}

/// Removes a trailing "prs", then a trailing "pullrequests"
fn strip_variant_suffix(resource: &str) -> &str {
    let resource = resource.strip_suffix("prs").unwrap_or(resource);
    resource.strip_suffix("pullrequests").unwrap_or(resource)
}
