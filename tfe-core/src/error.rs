use thiserror::Error;

/// Errors raised while talking to the TFE API or managing resource state.
#[derive(Error, Debug)]
pub enum TfeError {
    /// The remote entity does not exist (HTTP 404).
    #[error("resource not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid value for agent pool ID")]
    InvalidAgentPoolId,

    /// A business rule on the remote entity forbids the requested change.
    #[error("{0}")]
    PreconditionFailed(String),

    /// Any remote failure wrapped with the agent pool it concerned.
    #[error("error {action} agent pool {agent_pool_id}: {source}")]
    AgentPool {
        action: &'static str,
        agent_pool_id: String,
        #[source]
        source: Box<TfeError>,
    },

    /// Import found no remote object behind the given ID.
    #[error("cannot import non-existent remote object: {resource_type} {id}")]
    ImportNotFound { resource_type: String, id: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("invalid value for attribute {attribute:?}: {message}")]
    InvalidAttribute { attribute: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TfeError {
    /// Wrap a remote failure with the agent pool ID it happened on.
    pub fn agent_pool(action: &'static str, agent_pool_id: &str, source: TfeError) -> Self {
        TfeError::AgentPool {
            action,
            agent_pool_id: agent_pool_id.to_string(),
            source: Box::new(source),
        }
    }

    pub fn invalid_attribute(attribute: &str, message: impl Into<String>) -> Self {
        TfeError::InvalidAttribute {
            attribute: attribute.to_string(),
            message: message.into(),
        }
    }

    /// True when this error, or the error it wraps, is a remote 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            TfeError::NotFound => true,
            TfeError::AgentPool { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    pub fn is_precondition_failed(&self) -> bool {
        matches!(self, TfeError::PreconditionFailed(_))
    }
}

impl From<serde_yaml_ng::Error> for TfeError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        TfeError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for TfeError {
    fn from(err: serde_json::Error) -> Self {
        TfeError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TfeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_pool_wrapper_includes_id_and_cause() {
        let err = TfeError::agent_pool(
            "updating",
            "apool-123",
            TfeError::Api {
                status: 422,
                message: "Invalid workspace".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "error updating agent pool apool-123: API error (422): Invalid workspace"
        );
    }

    #[test]
    fn test_is_not_found_looks_through_wrapper() {
        assert!(TfeError::NotFound.is_not_found());
        assert!(TfeError::agent_pool("reading configuration of", "apool-1", TfeError::NotFound)
            .is_not_found());
        assert!(!TfeError::Unauthorized.is_not_found());
    }

    #[test]
    fn test_precondition_message_is_verbatim() {
        let err = TfeError::PreconditionFailed("workspaces already scoped".to_string());
        assert!(err.is_precondition_failed());
        assert_eq!(err.to_string(), "workspaces already scoped");
    }

    #[test]
    fn test_serde_errors_convert_to_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(TfeError::from(json_err), TfeError::Serialization(_)));
    }
}
