// External crates
use clap::Parser;
use tracing::debug;

// Internal imports
use tfe_core::tfe_error;
use tfe_logging::LogSettings;

// Local modules
mod cli;
mod commands;
mod state;

use cli::Args;
use commands::execute_command;

fn main() {
    let args = Args::parse();

    let settings = if args.debug {
        LogSettings::debug_from_env()
    } else {
        LogSettings::from_env()
    };
    let _log_guard = tfe_logging::init_subscriber(&settings);

    debug!(command = ?args.command, state = %args.state.display(), "Starting tfe-pool");

    if let Err(e) = execute_command(args) {
        tfe_error!("Error: {e:#}");
        std::process::exit(1);
    }
}
