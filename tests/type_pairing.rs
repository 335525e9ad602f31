//! Base/variant kind pairing tests
//!
//! Exercises `SuffixPairing` over hand-written kind sets and over every
//! subset of a small kind universe.

use pr_controller::ResourceKind;
use pr_controller::reconcile::{PairingStrategy, SuffixPairing, is_variant};

fn kind(group: &str, resource: &str) -> ResourceKind {
    ResourceKind::new(group, "v1alpha1", resource, "")
}

fn resolve(kinds: &[ResourceKind]) -> Vec<(String, String)> {
    SuffixPairing
        .resolve(kinds)
        .into_iter()
        .map(|(base, variant)| (base.resource, variant.resource))
        .collect()
}

#[test]
fn test_carvel_package_pairs_with_pr_variant() {
    let kinds = vec![
        kind("g", "carvelpackages"),
        kind("g", "renovates"),
        kind("g", "carvelpackageprs"),
    ];

    assert_eq!(
        resolve(&kinds),
        vec![("carvelpackages".to_string(), "carvelpackageprs".to_string())]
    );
}

#[test]
fn test_mixed_kinds_resolve_to_single_pair() {
    let kinds = vec![
        kind("g", "carvelpackageprs"),
        kind("g", "renovates"),
        kind("g", "carvelpackages"),
        kind("h", "containerappworkflows"),
    ];

    let mapping = SuffixPairing.resolve(&kinds);

    assert_eq!(mapping.len(), 1);
    assert_eq!(
        mapping.get(&kind("g", "carvelpackages")),
        Some(&kind("g", "carvelpackageprs"))
    );
}

#[test]
fn test_pullrequests_suffix() {
    let kinds = vec![kind("g", "examples"), kind("g", "examplepullrequests")];
    assert_eq!(
        resolve(&kinds),
        vec![("examples".to_string(), "examplepullrequests".to_string())]
    );
}

#[test]
fn test_no_cross_group_pairing() {
    let kinds = vec![kind("g", "carvelpackages"), kind("h", "carvelpackageprs")];
    assert!(SuffixPairing.resolve(&kinds).is_empty());
}

#[test]
fn test_smallest_variant_wins() {
    // both strip to "example"
    let kinds = vec![
        kind("g", "examples"),
        kind("g", "exampleprs"),
        kind("g", "examplepullrequests"),
    ];

    assert_eq!(
        resolve(&kinds),
        vec![("examples".to_string(), "exampleprs".to_string())]
    );
}

#[test]
fn test_input_order_does_not_matter() {
    let forward = vec![
        kind("g", "carvelpackages"),
        kind("g", "carvelpackageprs"),
        kind("h", "examples"),
        kind("h", "exampleprs"),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();

    assert_eq!(SuffixPairing.resolve(&forward), SuffixPairing.resolve(&reversed));
}

#[test]
fn test_empty_and_duplicate_input() {
    assert!(SuffixPairing.resolve(&[]).is_empty());

    let kinds = vec![
        kind("g", "carvelpackages"),
        kind("g", "carvelpackages"),
        kind("g", "carvelpackageprs"),
    ];
    assert_eq!(SuffixPairing.resolve(&kinds).len(), 1);
}

#[test]
fn test_mapping_invariants_over_all_subsets() {
    let universe = vec![
        kind("g", "carvelpackages"),
        kind("g", "carvelpackageprs"),
        kind("g", "renovates"),
        kind("g", "examples"),
        kind("g", "examplepullrequests"),
        kind("h", "carvelpackageprs"),
        kind("h", "containerappworkflows"),
        kind("h", "containerappworkflowprs"),
    ];

    for mask in 0u32..(1 << universe.len()) {
        let subset: Vec<ResourceKind> = universe
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, k)| k.clone())
            .collect();

        for (base, variant) in SuffixPairing.resolve(&subset) {
            assert_ne!(base, variant, "subset {:#b} mapped a kind to itself", mask);
            assert_eq!(base.group, variant.group, "subset {:#b} crossed groups", mask);
            assert!(!is_variant(&base), "subset {:#b} used a variant as base", mask);
            assert!(is_variant(&variant), "subset {:#b} mapped to a non-variant", mask);
            assert!(subset.contains(&base) && subset.contains(&variant));
        }
    }
}
