//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod logging;
mod version;

pub use commands::{ConfigSubcommand, RunArgs, build_engine, handle_config_command, handle_run};
pub use logging::init_logging;
pub use version::display_version;
