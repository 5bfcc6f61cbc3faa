use crate::context::ConfiguredClient;
use crate::data::ResourceData;
use crate::schema::ResourceSchema;
use tfe_core::error::{Result, TfeError};

/// The contract every managed resource type fulfils.
///
/// The host owns state storage and change detection; a resource only maps
/// its data onto remote calls. Clearing the ID in `create`, `read` or
/// `update` tells the host the remote object is gone.
pub trait Resource: Send + Sync {
    /// Type name as written in configuration, e.g. `tfe_agent_pool_allowed_workspaces`.
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> &ResourceSchema;

    /// Create the remote object. Sets the ID on success.
    fn create(&self, data: &mut ResourceData, meta: &ConfiguredClient) -> Result<()>;

    /// Refresh `data` from the remote object identified by its ID.
    fn read(&self, data: &mut ResourceData, meta: &ConfiguredClient) -> Result<()>;

    /// Push changed attributes to the remote object.
    fn update(&self, data: &mut ResourceData, meta: &ConfiguredClient) -> Result<()>;

    fn delete(&self, data: &ResourceData, meta: &ConfiguredClient) -> Result<()>;

    /// Turn an import ID into resource data to be populated by `read`.
    ///
    /// The default passes the ID straight through.
    fn import(&self, id: &str, meta: &ConfiguredClient) -> Result<ResourceData> {
        let _ = meta;
        let id = id.trim();
        if id.is_empty() {
            return Err(TfeError::invalid_attribute("id", "import ID must not be empty"));
        }
        Ok(ResourceData::with_id(id))
    }
}
