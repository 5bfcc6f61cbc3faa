/// An agent pool as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentPool {
    pub id: String,
    pub name: String,
    pub agent_count: u32,
    /// When true every workspace in the organization may use the pool.
    pub organization_scoped: bool,
    pub organization: Option<Organization>,
    pub allowed_workspaces: Vec<WorkspaceRef>,
}

impl AgentPool {
    pub fn new(id: impl Into<String>, organization: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            agent_count: 0,
            organization_scoped: false,
            organization: Some(Organization {
                name: organization.into(),
            }),
            allowed_workspaces: Vec::new(),
        }
    }

    pub fn organization_scoped(mut self, scoped: bool) -> Self {
        self.organization_scoped = scoped;
        self
    }

    pub fn with_allowed_workspaces<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_workspaces = ids.into_iter().map(WorkspaceRef::new).collect();
        self
    }

    pub fn organization_name(&self) -> &str {
        self.organization.as_ref().map_or("", |org| org.name.as_str())
    }

    pub fn allowed_workspace_ids(&self) -> impl Iterator<Item = &str> {
        self.allowed_workspaces.iter().map(|ws| ws.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
}

/// A workspace referenced only by ID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkspaceRef {
    pub id: String,
}

impl WorkspaceRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Body of the "update allowed workspaces" call. An empty list detaches
/// every workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedWorkspacesUpdateOptions {
    pub allowed_workspaces: Vec<WorkspaceRef>,
}

impl AllowedWorkspacesUpdateOptions {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_workspaces: ids.into_iter().map(WorkspaceRef::new).collect(),
        }
    }

    pub fn workspace_ids(&self) -> Vec<String> {
        self.allowed_workspaces.iter().map(|ws| ws.id.clone()).collect()
    }
}
