//! CLI command handlers

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{CatalogSource, Config, ConfigLoader};
use crate::config::loader::CONFIG_PATH_ENV;
use crate::kube::{DiscoveryCatalog, KubeStore, ResourceStore, SupplyChainCatalog, TypeCatalog};
use crate::reconcile::ReconcileEngine;
use crate::server::{self, AppState};

/// Options for the `run` command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// The address to bind to (default: localhost)
    #[arg(long)]
    pub bind_address: Option<String>,

    /// The port to run the webserver on (default: 8080)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Path to a YAML configuration file
    #[arg(long, short = 'c', env = CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the effective configuration as YAML
    Show {
        /// Path to a YAML configuration file
        #[arg(long, short = 'c', env = CONFIG_PATH_ENV)]
        config: Option<PathBuf>,
    },
    /// Validate configuration
    Validate {
        /// Path to a YAML configuration file
        #[arg(long, short = 'c', env = CONFIG_PATH_ENV)]
        config: Option<PathBuf>,
    },
}

/// Run the webhook server
pub async fn handle_run(args: RunArgs) -> Result<()> {
    // RunArgs::default() skips clap, so the env fallback is applied here too
    let path = args
        .config
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
    let mut config = ConfigLoader::load(path.as_deref())?;
    if let Some(bind_address) = args.bind_address {
        config.server.bind_address = bind_address;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    ConfigLoader::validate(&config)?;

    tracing::debug!("Configuration loaded: {:?}", config);

    let client = crate::kube::create_client().await?;
    let engine = build_engine(&config, client);

    tracing::info!("Starting handlers for github and gitlab");
    server::serve(&config.server, AppState::from_env(engine)).await
}

/// Wire the store and the configured catalog into an engine
pub fn build_engine(config: &Config, client: kube::Client) -> ReconcileEngine {
    let store: Arc<dyn ResourceStore> = Arc::new(KubeStore::new(client.clone()));

    let catalog: Arc<dyn TypeCatalog> = match config.catalog.source {
        CatalogSource::SupplyChain => {
            let supply_chain = config.catalog.supply_chain.resource_kind();
            tracing::info!("Discovering workload kinds from {}", supply_chain);
            Arc::new(SupplyChainCatalog::new(store.clone(), supply_chain))
        }
        CatalogSource::Discovery => {
            tracing::info!(
                "Discovering workload kinds in category {}",
                config.catalog.category
            );
            Arc::new(DiscoveryCatalog::new(client, config.catalog.category.clone()))
        }
    };

    ReconcileEngine::new(store, catalog)
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Show { config } => {
            let config = load(config.as_deref())?;
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Validate { config } => match load(config.as_deref()) {
            Ok(_) => println!("Configuration is valid"),
            Err(e) => {
                eprintln!("Configuration validation failed: {:#}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

fn load(path: Option<&Path>) -> Result<Config> {
    ConfigLoader::load(path).context("Failed to load configuration")
}
