// CLI argument parsing and definitions

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "tfe-pool")]
#[command(about = "Manage the workspaces allowed to use a TFE agent pool")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a provider configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the local state file
    #[arg(short, long, global = true, default_value = "tfe-pool.state.json")]
    pub state: PathBuf,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,
}

/// Desired configuration of the allowed-workspaces resource.
#[derive(Debug, Clone, ClapArgs)]
pub struct ResourceArgs {
    /// ID of the agent pool (changing it replaces the resource)
    #[arg(long)]
    pub agent_pool_id: String,

    /// Workspace ID allowed to use the pool; repeat for several, omit for none
    #[arg(short, long = "workspace")]
    pub workspaces: Vec<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show what apply would do
    Plan(ResourceArgs),
    /// Make the remote allow-list match the given workspaces
    Apply(ResourceArgs),
    /// Re-read the managed resource and update local state
    Refresh,
    /// Detach all workspaces from the managed pool and forget it
    Destroy,
    /// Start managing an existing agent pool's allow-list
    Import {
        /// ID of the agent pool to import
        agent_pool_id: String,
    },
    /// Print the local state
    Show,
    /// Print the resource schema as JSON
    Schema,
}
