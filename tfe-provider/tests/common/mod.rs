//! Shared fixtures for provider tests.

#![allow(dead_code)]

use serde_json::json;
use std::sync::Arc;
use tfe_client::mock::MockAgentPools;
use tfe_client::AgentPool;
use tfe_provider::{AllowedWorkspacesResource, ConfiguredClient, Resource, ResourceData};

pub struct Fixture {
    pub mock: Arc<MockAgentPools>,
    pub meta: ConfiguredClient,
    pub resource: AllowedWorkspacesResource,
}

impl Fixture {
    pub fn new() -> Self {
        let mock = Arc::new(MockAgentPools::new());
        let meta = ConfiguredClient::new(mock.clone(), "mock.example.com");
        Self {
            mock,
            meta,
            resource: AllowedWorkspacesResource::new(),
        }
    }

    /// A pool open to an explicit allow-list.
    pub fn with_pool(self, id: &str, allowed: &[&str]) -> Self {
        self.mock.insert_pool(
            AgentPool::new(id, "acme").with_allowed_workspaces(allowed.iter().copied()),
        );
        self
    }

    /// A pool available to the whole organization.
    pub fn with_org_scoped_pool(self, id: &str) -> Self {
        self.mock
            .insert_pool(AgentPool::new(id, "acme").organization_scoped(true));
        self
    }

    pub fn config(&self, agent_pool_id: &str, workspace_ids: &[&str]) -> ResourceData {
        ResourceData::from_config(
            self.resource.schema(),
            &json!({
                "agent_pool_id": agent_pool_id,
                "allowed_workspace_ids": workspace_ids,
            }),
        )
        .expect("fixture config should be valid")
    }

    pub fn remote_workspaces(&self, agent_pool_id: &str) -> Vec<String> {
        self.mock
            .pool(agent_pool_id)
            .map(|pool| pool.allowed_workspace_ids().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

pub fn sorted(ids: &[&str]) -> Vec<String> {
    let mut ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
    ids.sort();
    ids.dedup();
    ids
}
