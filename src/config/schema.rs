//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};

use crate::models::ResourceKind;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Where candidate resource kinds come from
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// The address to bind to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// The port to run the webserver on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Type catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: CatalogSource,

    /// Discovery category marking workload kinds (discovery source only)
    #[serde(default = "default_category")]
    pub category: String,

    /// Resource listing supply chains (supplyChain source only)
    #[serde(default)]
    pub supply_chain: SupplyChainConfig,
}

/// Catalog source selector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum CatalogSource {
    /// Read `spec.defines` from supply chain resources
    #[default]
    SupplyChain,
    /// Use API discovery filtered by category
    Discovery,
}

impl std::str::FromStr for CatalogSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "supplyChain" | "supply-chain" => Ok(CatalogSource::SupplyChain),
            "discovery" => Ok(CatalogSource::Discovery),
            _ => Err(format!("Unknown catalog source: {}", s)),
        }
    }
}

/// Group/version/resource of the supply chain type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupplyChainConfig {
    #[serde(default = "default_supply_chain_group")]
    pub group: String,

    #[serde(default = "default_supply_chain_version")]
    pub version: String,

    #[serde(default = "default_supply_chain_resource")]
    pub resource: String,
}

impl SupplyChainConfig {
    pub fn resource_kind(&self) -> ResourceKind {
        ResourceKind::new(&self.group, &self.version, &self.resource, "SupplyChain")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: CatalogSource::default(),
            category: default_category(),
            supply_chain: SupplyChainConfig::default(),
        }
    }
}

impl Default for SupplyChainConfig {
    fn default() -> Self {
        Self {
            group: default_supply_chain_group(),
            version: default_supply_chain_version(),
            resource: default_supply_chain_resource(),
        }
    }
}

fn default_bind_address() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_category() -> String {
    "all-workloads".to_string()
}

fn default_supply_chain_group() -> String {
    "supply-chain.apps.tanzu.vmware.com".to_string()
}

fn default_supply_chain_version() -> String {
    "v1alpha1".to_string()
}

fn default_supply_chain_resource() -> String {
    "supplychains".to_string()
}
