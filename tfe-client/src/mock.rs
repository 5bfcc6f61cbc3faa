//! In-memory [`AgentPools`] for tests.

use crate::types::{AgentPool, AllowedWorkspacesUpdateOptions};
use crate::AgentPools;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tfe_core::error::{Result, TfeError};

/// One call made against the mock, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Read(String),
    UpdateAllowedWorkspaces {
        agent_pool_id: String,
        workspace_ids: Vec<String>,
    },
}

#[derive(Debug, Clone)]
struct InjectedFailure {
    status: u16,
    message: String,
}

impl InjectedFailure {
    fn to_error(&self) -> TfeError {
        TfeError::Api {
            status: self.status,
            message: self.message.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MockAgentPools {
    pools: Mutex<BTreeMap<String, AgentPool>>,
    calls: Mutex<Vec<ApiCall>>,
    read_failure: Mutex<Option<InjectedFailure>>,
    update_failure: Mutex<Option<InjectedFailure>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockAgentPools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(self, pool: AgentPool) -> Self {
        self.insert_pool(pool);
        self
    }

    pub fn insert_pool(&self, pool: AgentPool) {
        lock(&self.pools).insert(pool.id.clone(), pool);
    }

    pub fn remove_pool(&self, agent_pool_id: &str) -> Option<AgentPool> {
        lock(&self.pools).remove(agent_pool_id)
    }

    pub fn pool(&self, agent_pool_id: &str) -> Option<AgentPool> {
        lock(&self.pools).get(agent_pool_id).cloned()
    }

    /// Flip the organization-scoped flag of a stored pool.
    pub fn set_organization_scoped(&self, agent_pool_id: &str, scoped: bool) {
        if let Some(pool) = lock(&self.pools).get_mut(agent_pool_id) {
            pool.organization_scoped = scoped;
        }
    }

    /// Every read from now on fails with the given API error.
    pub fn fail_reads(&self, status: u16, message: &str) {
        *lock(&self.read_failure) = Some(InjectedFailure {
            status,
            message: message.to_string(),
        });
    }

    /// Every update from now on fails with the given API error.
    pub fn fail_updates(&self, status: u16, message: &str) {
        *lock(&self.update_failure) = Some(InjectedFailure {
            status,
            message: message.to_string(),
        });
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        lock(&self.calls).clone()
    }

    /// Only the update calls, as `(agent_pool_id, workspace_ids)`.
    pub fn update_calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::UpdateAllowedWorkspaces {
                    agent_pool_id,
                    workspace_ids,
                } => Some((agent_pool_id, workspace_ids)),
                ApiCall::Read(_) => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }
}

impl AgentPools for MockAgentPools {
    fn read(&self, agent_pool_id: &str) -> Result<AgentPool> {
        lock(&self.calls).push(ApiCall::Read(agent_pool_id.to_string()));

        if let Some(failure) = lock(&self.read_failure).as_ref() {
            return Err(failure.to_error());
        }
        self.pool(agent_pool_id).ok_or(TfeError::NotFound)
    }

    fn update_allowed_workspaces(
        &self,
        agent_pool_id: &str,
        options: &AllowedWorkspacesUpdateOptions,
    ) -> Result<AgentPool> {
        lock(&self.calls).push(ApiCall::UpdateAllowedWorkspaces {
            agent_pool_id: agent_pool_id.to_string(),
            workspace_ids: options.workspace_ids(),
        });

        if let Some(failure) = lock(&self.update_failure).as_ref() {
            return Err(failure.to_error());
        }

        let mut pools = lock(&self.pools);
        let pool = pools.get_mut(agent_pool_id).ok_or(TfeError::NotFound)?;
        pool.allowed_workspaces = options.allowed_workspaces.clone();
        Ok(pool.clone())
    }
}
