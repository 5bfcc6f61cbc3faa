//! Provider for agent pool allowed workspaces.
//!
//! This crate holds the resource framework (schema, typed resource data,
//! the [`Resource`] trait and a small lifecycle driver) and the one resource
//! it serves, [`AllowedWorkspacesResource`]. All remote access goes through
//! a [`ConfiguredClient`] handed to each operation.

pub mod allowed_workspaces;
pub mod context;
pub mod data;
pub mod lifecycle;
pub mod registry;
pub mod resource;
pub mod schema;

pub use allowed_workspaces::AllowedWorkspacesResource;
pub use context::ConfiguredClient;
pub use data::{AttributeValue, ResourceData};
pub use lifecycle::{ApplyFailure, Plan};
pub use resource::Resource;
pub use schema::{Attribute, AttributeType, ResourceSchema};
pub use tfe_core::error::{Result, TfeError};
