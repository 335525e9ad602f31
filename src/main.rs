//! pr-controller - reconciles pull request webhooks into Kubernetes
//!
//! Receives GitHub/GitLab pull request events and creates, updates or deletes
//! the pull-request scoped variant of the workload tracking that repository.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pr_controller::cli::{self, ConfigSubcommand, RunArgs};

/// pr-controller - reconciles pull request webhooks into Kubernetes
#[derive(Parser, Debug)]
#[command(name = "pr-controller")]
#[command(about = "Reconciles pull request webhooks into pull-request scoped workloads", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the webserver
    #[command(visible_alias = "r")]
    Run(RunArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Print version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Command::Config { subcommand }) => cli::handle_config_command(subcommand),
        Some(Command::Version) => {
            cli::display_version();
            Ok(())
        }
        Some(Command::Run(run_args)) => {
            cli::init_logging(args.debug);
            cli::handle_run(run_args).await
        }
        None => {
            cli::init_logging(args.debug);
            cli::handle_run(RunArgs::default()).await
        }
    }
}
