//! JSON:API documents exchanged with the agent pool endpoints.

use crate::types::{AgentPool, AllowedWorkspacesUpdateOptions, Organization, WorkspaceRef};
use serde::{Deserialize, Serialize};

pub(crate) const MEDIA_TYPE: &str = "application/vnd.api+json";

#[derive(Debug, Deserialize)]
pub(crate) struct Document<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub(crate) struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AgentPoolResource {
    pub id: String,
    #[serde(default)]
    pub attributes: AgentPoolAttributes,
    #[serde(default)]
    pub relationships: AgentPoolRelationships,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct AgentPoolAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub agent_count: u32,
    #[serde(default)]
    pub organization_scoped: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct AgentPoolRelationships {
    #[serde(default)]
    pub organization: Option<ToOne>,
    #[serde(default)]
    pub allowed_workspaces: Option<ToMany>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToOne {
    pub data: Option<ResourceIdentifier>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub(crate) struct ToMany {
    #[serde(default)]
    pub data: Vec<ResourceIdentifier>,
}

impl From<AgentPoolResource> for AgentPool {
    fn from(resource: AgentPoolResource) -> Self {
        let organization = resource
            .relationships
            .organization
            .and_then(|rel| rel.data)
            .map(|org| Organization { name: org.id });
        let allowed_workspaces = resource
            .relationships
            .allowed_workspaces
            .map(|rel| rel.data)
            .unwrap_or_default()
            .into_iter()
            .map(|ws| WorkspaceRef { id: ws.id })
            .collect();

        AgentPool {
            id: resource.id,
            name: resource.attributes.name,
            agent_count: resource.attributes.agent_count,
            organization_scoped: resource.attributes.organization_scoped,
            organization,
            allowed_workspaces,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateDocument {
    pub data: UpdateData,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateData {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub relationships: UpdateRelationships,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct UpdateRelationships {
    pub allowed_workspaces: ToMany,
}

impl From<&AllowedWorkspacesUpdateOptions> for UpdateDocument {
    fn from(options: &AllowedWorkspacesUpdateOptions) -> Self {
        let data = options
            .allowed_workspaces
            .iter()
            .map(|ws| ResourceIdentifier {
                kind: "workspaces".to_string(),
                id: ws.id.clone(),
            })
            .collect();

        UpdateDocument {
            data: UpdateData {
                kind: "agent-pools",
                relationships: UpdateRelationships {
                    allowed_workspaces: ToMany { data },
                },
            },
        }
    }
}

/// Error body. Older endpoints send bare strings instead of objects.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorEntry {
    Plain(String),
    Detailed {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        detail: Option<String>,
    },
}

impl ErrorEntry {
    fn summary(&self) -> Option<String> {
        match self {
            ErrorEntry::Plain(message) => Some(message.clone()),
            ErrorEntry::Detailed { title, detail } => match (title, detail) {
                (Some(title), Some(detail)) => Some(format!("{title}: {detail}")),
                (Some(only), None) | (None, Some(only)) => Some(only.clone()),
                (None, None) => None,
            },
        }
    }
}

/// Flatten an error body into one line, or `None` if it is not a JSON:API
/// error document.
pub(crate) fn error_summary(body: &str) -> Option<String> {
    let document: ErrorDocument = serde_json::from_str(body).ok()?;
    let messages: Vec<String> = document.errors.iter().filter_map(ErrorEntry::summary).collect();
    if messages.is_empty() {
        None
    } else {
        Some(messages.join("; "))
    }
}
