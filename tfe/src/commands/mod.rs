// Command handlers for agent pool operations

use crate::cli::{Args, Command};
use crate::state::StateFile;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tfe_config::ProviderConfig;
use tfe_core::tfe_println;
use tfe_provider::allowed_workspaces::RESOURCE_TYPE;
use tfe_provider::{registry, ConfiguredClient, Resource};
use tracing::debug;

pub mod apply;
pub mod schema;
pub mod state_ops;

/// Everything a remote command needs: the API handle, the resource
/// implementation and the loaded state.
pub struct Session {
    pub meta: ConfiguredClient,
    pub resource: Box<dyn Resource>,
    pub state: StateFile,
    state_path: PathBuf,
}

impl Session {
    fn open(config_path: Option<&Path>, state: StateFile, state_path: &Path) -> Result<Self> {
        let config = ProviderConfig::load(config_path).context("Failed to load provider configuration")?;
        debug!(config = ?config, "Resolved provider configuration");
        let meta = ConfiguredClient::from_config(&config).context("Failed to configure TFE client")?;

        let resource_type = state
            .resource
            .as_ref()
            .map_or(RESOURCE_TYPE, |r| r.resource_type.as_str());
        let resource = registry::lookup(resource_type)?;
        debug!(hostname = meta.hostname(), resource = resource_type, "Session opened");

        Ok(Self {
            meta,
            resource,
            state,
            state_path: state_path.to_path_buf(),
        })
    }

    pub fn save(&self) -> Result<()> {
        self.state
            .save(&self.state_path)
            .with_context(|| format!("Failed to write state to {}", self.state_path.display()))
    }
}

pub fn load_state(path: &Path) -> Result<StateFile> {
    StateFile::load(path).with_context(|| format!("Failed to read state from {}", path.display()))
}

/// Main command dispatcher
#[must_use = "command execution results should be handled"]
pub fn execute_command(args: Args) -> Result<()> {
    // Commands that never talk to the API
    match &args.command {
        Command::Schema => return schema::handle_schema(),
        Command::Show => return state_ops::handle_show(&args.state),
        _ => {}
    }

    let state = load_state(&args.state)?;
    if state.resource.is_none() {
        // Nothing to talk to the API about.
        match &args.command {
            Command::Refresh => {
                tfe_println!("No resource in state.");
                return Ok(());
            }
            Command::Destroy => {
                tfe_println!("Nothing to destroy.");
                return Ok(());
            }
            _ => {}
        }
    }

    let mut session = Session::open(args.config.as_deref(), state, &args.state)?;
    match args.command {
        Command::Plan(resource_args) => {
            debug!("Handling plan command");
            apply::handle_plan(&session, &resource_args)
        }
        Command::Apply(resource_args) => {
            debug!("Handling apply command");
            apply::handle_apply(&mut session, &resource_args)
        }
        Command::Refresh => {
            debug!("Handling refresh command");
            state_ops::handle_refresh(&mut session)
        }
        Command::Destroy => {
            debug!("Handling destroy command");
            state_ops::handle_destroy(&mut session)
        }
        Command::Import { agent_pool_id } => {
            debug!("Handling import command");
            state_ops::handle_import(&mut session, &agent_pool_id)
        }
        Command::Schema | Command::Show => Ok(()),
    }
}
