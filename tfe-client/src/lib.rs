//! Client for the agent pool endpoints of the TFE API.
//!
//! [`AgentPools`] is the seam the provider programs against. [`TfeClient`]
//! implements it over blocking HTTP; the `test-helpers` feature adds an
//! in-memory implementation.

use tfe_core::error::{Result, TfeError};

pub mod http;
mod jsonapi;
pub mod types;

#[cfg(feature = "test-helpers")]
pub mod mock;

pub use http::TfeClient;
pub use types::{AgentPool, AllowedWorkspacesUpdateOptions, Organization, WorkspaceRef};

/// Agent pool operations used by the allowed-workspaces resource.
pub trait AgentPools: Send + Sync {
    /// Read an agent pool. A missing pool is reported as `TfeError::NotFound`.
    fn read(&self, agent_pool_id: &str) -> Result<AgentPool>;

    /// Replace the full list of workspaces allowed to use the pool.
    fn update_allowed_workspaces(
        &self,
        agent_pool_id: &str,
        options: &AllowedWorkspacesUpdateOptions,
    ) -> Result<AgentPool>;
}

/// Agent pool IDs are path segments, so only `[A-Za-z0-9._-]` is accepted.
pub fn validate_agent_pool_id(agent_pool_id: &str) -> Result<()> {
    let valid = !agent_pool_id.is_empty()
        && agent_pool_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(TfeError::InvalidAgentPoolId)
    }
}
