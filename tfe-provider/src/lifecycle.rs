//! Host-side driver: decides what to do with a resource given its stored
//! state and desired configuration, then runs the resource operations.

use crate::context::ConfiguredClient;
use crate::data::ResourceData;
use crate::resource::Resource;
use crate::schema::ResourceSchema;
use std::fmt;
use thiserror::Error;
use tfe_core::error::{Result, TfeError};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Create,
    Update { changed: Vec<String> },
    /// A ForceNew attribute changed: delete, then create.
    Replace { reasons: Vec<String> },
    NoOp,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Create => write!(f, "create"),
            Plan::Update { changed } => write!(f, "update in-place ({})", changed.join(", ")),
            Plan::Replace { reasons } => {
                write!(f, "replace (forced by {})", reasons.join(", "))
            }
            Plan::NoOp => write!(f, "no changes"),
        }
    }
}

/// Compare stored state against desired configuration.
pub fn plan(schema: &ResourceSchema, prior: Option<&ResourceData>, desired: &ResourceData) -> Plan {
    let Some(prior) = prior.filter(|state| state.has_id()) else {
        return Plan::Create;
    };

    let changed: Vec<String> = schema
        .attributes()
        .filter(|(name, _)| prior.attribute(name) != desired.attribute(name))
        .map(|(name, _)| name.to_string())
        .collect();

    if changed.is_empty() {
        return Plan::NoOp;
    }

    let reasons: Vec<String> = changed
        .iter()
        .filter(|name| schema.is_force_new(name))
        .cloned()
        .collect();

    if reasons.is_empty() {
        Plan::Update { changed }
    } else {
        Plan::Replace { reasons }
    }
}

/// A failed apply, with the state that matches the remote afterwards.
///
/// A replace whose delete succeeded has already cleared the old object, so
/// `state` is `None` even though the prior state existed.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ApplyFailure {
    pub state: Option<ResourceData>,
    pub error: TfeError,
}

/// Bring the remote object in line with `desired`.
///
/// `prior` should already be refreshed. Returns the new state, or `None`
/// when the resource ended up not existing.
pub fn apply(
    resource: &dyn Resource,
    prior: Option<&ResourceData>,
    desired: &ResourceData,
    meta: &ConfiguredClient,
) -> std::result::Result<Option<ResourceData>, ApplyFailure> {
    let plan = plan(resource.schema(), prior, desired);
    info!(resource = resource.type_name(), plan = %plan, "Applying");

    let unchanged = |error: TfeError| ApplyFailure {
        state: prior.cloned(),
        error,
    };

    match (plan, prior) {
        (Plan::NoOp, prior) => Ok(prior.cloned()),
        (Plan::Update { .. }, Some(prior)) => {
            let mut data = desired.clone();
            data.set_id(prior.id());
            resource.update(&mut data, meta).map_err(unchanged)?;
            if !data.has_id() {
                warn!(resource = resource.type_name(), id = prior.id(), "Resource vanished during update");
            }
            Ok(data.into_state())
        }
        (Plan::Replace { .. }, Some(prior)) => {
            resource.delete(prior, meta).map_err(unchanged)?;
            create(resource, desired, meta).map_err(|error| {
                warn!(
                    resource = resource.type_name(),
                    id = prior.id(),
                    "Replacement failed after the old object was deleted"
                );
                ApplyFailure { state: None, error }
            })
        }
        _ => create(resource, desired, meta).map_err(unchanged),
    }
}

fn create(
    resource: &dyn Resource,
    desired: &ResourceData,
    meta: &ConfiguredClient,
) -> Result<Option<ResourceData>> {
    let mut data = desired.clone();
    data.clear_id();
    resource.create(&mut data, meta)?;
    if !data.has_id() {
        warn!(
            resource = resource.type_name(),
            "Create finished without an ID; nothing was recorded"
        );
    }
    Ok(data.into_state())
}

/// Re-read stored state. `None` means the remote object is gone.
pub fn refresh(
    resource: &dyn Resource,
    state: &ResourceData,
    meta: &ConfiguredClient,
) -> Result<Option<ResourceData>> {
    let mut data = state.clone();
    resource.read(&mut data, meta)?;
    if !data.has_id() {
        warn!(resource = resource.type_name(), id = state.id(), "Resource no longer exists remotely");
    }
    Ok(data.into_state())
}

pub fn destroy(resource: &dyn Resource, state: &ResourceData, meta: &ConfiguredClient) -> Result<()> {
    info!(resource = resource.type_name(), id = state.id(), "Destroying");
    resource.delete(state, meta)
}

/// Import an existing remote object by ID and populate it via `read`.
pub fn import(resource: &dyn Resource, id: &str, meta: &ConfiguredClient) -> Result<ResourceData> {
    let mut data = resource.import(id, meta)?;
    resource.read(&mut data, meta)?;
    data.into_state().ok_or_else(|| TfeError::ImportNotFound {
        resource_type: resource.type_name().to_string(),
        id: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, AttributeType};

    fn schema() -> ResourceSchema {
        ResourceSchema::new()
            .attribute("pool", Attribute::required(AttributeType::String).force_new())
            .attribute("members", Attribute::required(AttributeType::StringSet))
    }

    fn data(id: &str, pool: &str, members: &[&str]) -> ResourceData {
        let mut data = ResourceData::with_id(id);
        data.set_string("pool", pool);
        data.set_string_set("members", members.iter().copied());
        data
    }

    #[test]
    fn test_plan_create_without_prior() {
        let desired = data("", "p1", &["a"]);
        assert_eq!(plan(&schema(), None, &desired), Plan::Create);

        let removed = data("", "p1", &["a"]);
        assert_eq!(plan(&schema(), Some(&removed), &desired), Plan::Create);
    }

    #[test]
    fn test_plan_noop_update_replace() {
        let prior = data("p1", "p1", &["a", "b"]);

        assert_eq!(plan(&schema(), Some(&prior), &data("", "p1", &["b", "a"])), Plan::NoOp);
        assert_eq!(
            plan(&schema(), Some(&prior), &data("", "p1", &[])),
            Plan::Update {
                changed: vec!["members".to_string()]
            }
        );
        assert_eq!(
            plan(&schema(), Some(&prior), &data("", "p2", &["a"])),
            Plan::Replace {
                reasons: vec!["pool".to_string()]
            }
        );
    }

    #[test]
    fn test_plan_display() {
        assert_eq!(Plan::Create.to_string(), "create");
        assert_eq!(Plan::NoOp.to_string(), "no changes");
        assert_eq!(
            Plan::Replace {
                reasons: vec!["pool".to_string()]
            }
            .to_string(),
            "replace (forced by pool)"
        );
    }
}
