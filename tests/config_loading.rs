//! Configuration loading tests
//!
//! Loads YAML files from a temp dir and layers environment overrides on top.

use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

use pr_controller::config::loader::{CATALOG_SOURCE_ENV, PORT_ENV};
use pr_controller::config::{CatalogSource, Config, ConfigLoader};

fn no_env(_: &str) -> Option<String> {
    None
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults_without_file() {
    let config = ConfigLoader::load_with_env(None, no_env).unwrap();

    assert_eq!(config.server.bind_address, "localhost");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.catalog.source, CatalogSource::SupplyChain);
    assert_eq!(config.catalog.category, "all-workloads");
    assert_eq!(
        config.catalog.supply_chain.resource_kind().to_string(),
        "supplychains.supply-chain.apps.tanzu.vmware.com/v1alpha1"
    );
}

#[test]
fn test_full_file() {
    let file = write_config(
        r#"
server:
  bindAddress: 0.0.0.0
  port: 9443
catalog:
  source: discovery
  category: pr-workloads
  supplyChain:
    group: chains.example.com
    version: v1
    resource: chains
"#,
    );

    let config = ConfigLoader::load_with_env(Some(file.path()), no_env).unwrap();

    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.server.port, 9443);
    assert_eq!(config.catalog.source, CatalogSource::Discovery);
    assert_eq!(config.catalog.category, "pr-workloads");
    assert_eq!(config.catalog.supply_chain.group, "chains.example.com");
    assert_eq!(config.catalog.supply_chain.resource, "chains");
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config("server:\n  port: 9000\n");

    let config = ConfigLoader::load_with_env(Some(file.path()), no_env).unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.bind_address, "localhost");
    assert_eq!(config.catalog, ConfigLoader::load_defaults().catalog);
}

#[test]
fn test_env_overrides_file() {
    let file = write_config("server:\n  port: 9000\ncatalog:\n  source: discovery\n");
    let env: HashMap<&str, &str> = [(PORT_ENV, "7000"), (CATALOG_SOURCE_ENV, "supply-chain")]
        .into_iter()
        .collect();

    let config = ConfigLoader::load_with_env(Some(file.path()), |key| {
        env.get(key).map(|v| v.to_string())
    })
    .unwrap();

    assert_eq!(config.server.port, 7000);
    assert_eq!(config.catalog.source, CatalogSource::SupplyChain);
}

#[test]
fn test_invalid_yaml() {
    let file = write_config("server: [not, a, mapping\n");
    assert!(ConfigLoader::load_with_env(Some(file.path()), no_env).is_err());
}

#[test]
fn test_validation_runs_on_file_values() {
    let file = write_config("server:\n  port: 0\n");
    let err = ConfigLoader::load_with_env(Some(file.path()), no_env).unwrap_err();
    assert!(err.to_string().contains("server.port"), "{}", err);

    let file = write_config("catalog:\n  source: discovery\n  category: \"\"\n");
    assert!(ConfigLoader::load_with_env(Some(file.path()), no_env).is_err());
}

#[test]
fn test_round_trips_through_yaml() {
    let config = ConfigLoader::load_defaults();
    let yaml = serde_yaml::to_string(&config).unwrap();
    assert!(yaml.contains("bindAddress: localhost"), "{}", yaml);
    assert!(yaml.contains("source: supplyChain"), "{}", yaml);

    let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, config);
}
