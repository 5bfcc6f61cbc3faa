use std::fmt;
use std::sync::Arc;
use tfe_client::{AgentPools, TfeClient};
use tfe_config::ProviderConfig;
use tfe_core::error::Result;

/// The API handle passed explicitly into every resource operation.
///
/// Built once per process and treated as read-only by resources.
#[derive(Clone)]
pub struct ConfiguredClient {
    agent_pools: Arc<dyn AgentPools>,
    hostname: String,
}

impl ConfiguredClient {
    pub fn new(agent_pools: Arc<dyn AgentPools>, hostname: impl Into<String>) -> Self {
        Self {
            agent_pools,
            hostname: hostname.into(),
        }
    }

    /// Build an HTTP-backed handle from validated provider configuration.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let client = TfeClient::new(config)?;
        Ok(Self::new(Arc::new(client), config.hostname.clone()))
    }

    pub fn agent_pools(&self) -> &dyn AgentPools {
        self.agent_pools.as_ref()
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }
}

impl fmt::Debug for ConfiguredClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredClient")
            .field("hostname", &self.hostname)
            .finish_non_exhaustive()
    }
}
