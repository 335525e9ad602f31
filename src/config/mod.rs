//! Configuration system for pr-controller
//!
//! Layers built-in defaults, an optional YAML file and environment variable
//! overrides into a single [`Config`].

mod defaults;
pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{CatalogConfig, CatalogSource, Config, ServerConfig, SupplyChainConfig};
