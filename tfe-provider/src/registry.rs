//! Resource types this provider serves.

use crate::allowed_workspaces::AllowedWorkspacesResource;
use crate::resource::Resource;
use tfe_core::error::{Result, TfeError};

pub fn resources() -> Vec<Box<dyn Resource>> {
    vec![Box::new(AllowedWorkspacesResource::new())]
}

/// Look up a resource implementation by its type name.
pub fn lookup(type_name: &str) -> Result<Box<dyn Resource>> {
    resources()
        .into_iter()
        .find(|resource| resource.type_name() == type_name)
        .ok_or_else(|| TfeError::Config(format!("Unknown resource type: {type_name}")))
}
