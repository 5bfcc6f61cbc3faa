//! `tfe_agent_pool_allowed_workspaces`: which workspaces may use an agent
//! pool that is not organization-scoped.
//!
//! The resource never creates or destroys the pool itself. It only replaces
//! the pool's allowed-workspace list, and its ID is the agent pool ID.

use crate::context::ConfiguredClient;
use crate::data::ResourceData;
use crate::resource::Resource;
use crate::schema::{Attribute, AttributeType, ResourceSchema};
use tfe_client::AllowedWorkspacesUpdateOptions;
use tfe_core::error::{Result, TfeError};
use tracing::debug;

pub const RESOURCE_TYPE: &str = "tfe_agent_pool_allowed_workspaces";
pub const AGENT_POOL_ID: &str = "agent_pool_id";
pub const ALLOWED_WORKSPACE_IDS: &str = "allowed_workspace_ids";

const READING: &str = "reading configuration of";
const UPDATING: &str = "updating";

/// Result of pushing the configured list to the pool.
enum Applied {
    Updated,
    PoolMissing,
}

#[derive(Debug, Clone)]
pub struct AllowedWorkspacesResource {
    schema: ResourceSchema,
}

impl Default for AllowedWorkspacesResource {
    fn default() -> Self {
        Self::new()
    }
}

impl AllowedWorkspacesResource {
    pub fn new() -> Self {
        let schema = ResourceSchema::new()
            .attribute(
                AGENT_POOL_ID,
                Attribute::required(AttributeType::String)
                    .force_new()
                    .description("ID of the agent pool."),
            )
            .attribute(
                ALLOWED_WORKSPACE_IDS,
                Attribute::required(AttributeType::StringSet)
                    .description("IDs of the workspaces allowed to use the agent pool."),
            );
        Self { schema }
    }

    /// Shared body of create and update.
    ///
    /// Reads the pool first: organization-scoped pools refuse an explicit
    /// list and no update call is made. Otherwise the whole list is replaced
    /// and the ID set to the pool ID.
    fn apply_allowed_workspaces(
        &self,
        data: &mut ResourceData,
        meta: &ConfiguredClient,
    ) -> Result<Applied> {
        let agent_pool_id = data.get_string(AGENT_POOL_ID)?.to_string();
        let workspace_ids = data.get_string_set(ALLOWED_WORKSPACE_IDS)?;

        let agent_pool = match meta.agent_pools().read(&agent_pool_id) {
            Ok(pool) => pool,
            Err(e) if e.is_not_found() => {
                debug!(agent_pool_id = %agent_pool_id, "Agent pool no longer exists");
                return Ok(Applied::PoolMissing);
            }
            Err(e) => return Err(TfeError::agent_pool(READING, &agent_pool_id, e)),
        };

        if agent_pool.organization_scoped {
            return Err(TfeError::PreconditionFailed(format!(
                "error updating allowed workspaces on agent pool, workspaces already scoped for access to organization: {}",
                agent_pool.organization_name()
            )));
        }

        let options = AllowedWorkspacesUpdateOptions::from_ids(workspace_ids);
        debug!(
            agent_pool_id = %agent_pool_id,
            workspaces = options.allowed_workspaces.len(),
            "Update agent pool"
        );
        meta.agent_pools()
            .update_allowed_workspaces(&agent_pool_id, &options)
            .map_err(|e| TfeError::agent_pool(UPDATING, &agent_pool_id, e))?;

        data.set_id(agent_pool_id);
        Ok(Applied::Updated)
    }
}

impl Resource for AllowedWorkspacesResource {
    fn type_name(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    /// A pool that has disappeared is not an error: nothing is created and
    /// the ID stays empty.
    fn create(&self, data: &mut ResourceData, meta: &ConfiguredClient) -> Result<()> {
        match self.apply_allowed_workspaces(data, meta)? {
            Applied::Updated => self.read(data, meta),
            Applied::PoolMissing => Ok(()),
        }
    }

    fn read(&self, data: &mut ResourceData, meta: &ConfiguredClient) -> Result<()> {
        let id = data.id().to_string();

        let agent_pool = match meta.agent_pools().read(&id) {
            Ok(pool) => pool,
            Err(e) if e.is_not_found() => {
                debug!(agent_pool_id = %id, "Agent pool no longer exists");
                data.clear_id();
                return Ok(());
            }
            Err(e) => return Err(TfeError::agent_pool(READING, &id, e)),
        };

        data.set_string_set(ALLOWED_WORKSPACE_IDS, agent_pool.allowed_workspace_ids());
        data.set_string(AGENT_POOL_ID, agent_pool.id);
        Ok(())
    }

    /// Replaces the full list; an empty set detaches every workspace.
    fn update(&self, data: &mut ResourceData, meta: &ConfiguredClient) -> Result<()> {
        match self.apply_allowed_workspaces(data, meta)? {
            Applied::Updated => self.read(data, meta),
            Applied::PoolMissing => {
                data.clear_id();
                Ok(())
            }
        }
    }

    /// Detaches every workspace. No existence or organization-scoped check is
    /// made, so a pool that became organization-scoped elsewhere still gets
    /// its stale list cleared.
    fn delete(&self, data: &ResourceData, meta: &ConfiguredClient) -> Result<()> {
        let agent_pool_id = data.get_string(AGENT_POOL_ID)?;

        debug!(agent_pool_id = %agent_pool_id, "Update agent pool");
        meta.agent_pools()
            .update_allowed_workspaces(agent_pool_id, &AllowedWorkspacesUpdateOptions::default())
            .map_err(|e| TfeError::agent_pool(UPDATING, agent_pool_id, e))?;

        Ok(())
    }
}
