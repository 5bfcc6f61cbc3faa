use crate::jsonapi::{self, AgentPoolResource, Document, UpdateDocument, MEDIA_TYPE};
use crate::types::{AgentPool, AllowedWorkspacesUpdateOptions};
use crate::{validate_agent_pool_id, AgentPools};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use std::time::Duration;
use tfe_config::ProviderConfig;
use tfe_core::error::{Result, TfeError};
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("tfe-agent-pool/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client for the TFE v2 API.
///
/// Built once from a validated [`ProviderConfig`] and shared read-only.
/// Requests honour the configured timeout and are never retried.
#[derive(Debug, Clone)]
pub struct TfeClient {
    http: Client,
    base_url: Url,
}

impl TfeClient {
    /// Create a client for the configured host.
    ///
    /// # Errors
    ///
    /// Returns `TfeError::Config` when the configuration is incomplete or the
    /// token cannot be used as a header value, and `TfeError::Network` when
    /// the underlying HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url()?;
        let token = config.token.as_deref().unwrap_or_default();

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| TfeError::Config("API token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));

        if config.ssl_skip_verify {
            warn!(hostname = %config.hostname, "TLS certificate verification is disabled");
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .danger_accept_invalid_certs(config.ssl_skip_verify)
            .build()
            .map_err(|e| TfeError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn agent_pool_url(&self, agent_pool_id: &str) -> Result<Url> {
        validate_agent_pool_id(agent_pool_id)?;
        self.base_url
            .join(&format!("agent-pools/{agent_pool_id}"))
            .map_err(|e| TfeError::Internal(format!("Failed to build agent pool URL: {e}")))
    }

    /// Send a request and return the body of a successful response.
    fn execute(&self, request: RequestBuilder) -> Result<String> {
        let response = request
            .send()
            .map_err(|e| TfeError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        let url = response.url().clone();
        let body = response
            .text()
            .map_err(|e| TfeError::Network(format!("failed to read response body: {e}")))?;
        debug!(url = %url, status = status.as_u16(), "TFE API response");

        check_status(status, &body)?;
        Ok(body)
    }

    fn decode_pool(body: &str) -> Result<AgentPool> {
        let document: Document<AgentPoolResource> = serde_json::from_str(body)?;
        Ok(document.data.into())
    }
}

fn check_status(status: StatusCode, body: &str) -> Result<()> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::UNAUTHORIZED => Err(TfeError::Unauthorized),
        StatusCode::NOT_FOUND => Err(TfeError::NotFound),
        s => {
            let message = jsonapi::error_summary(body)
                .or_else(|| s.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "unexpected response".to_string());
            Err(TfeError::Api {
                status: s.as_u16(),
                message,
            })
        }
    }
}

impl AgentPools for TfeClient {
    fn read(&self, agent_pool_id: &str) -> Result<AgentPool> {
        let url = self.agent_pool_url(agent_pool_id)?;
        debug!(agent_pool_id, "Reading agent pool");

        let body = self.execute(self.http.get(url))?;
        Self::decode_pool(&body)
    }

    fn update_allowed_workspaces(
        &self,
        agent_pool_id: &str,
        options: &AllowedWorkspacesUpdateOptions,
    ) -> Result<AgentPool> {
        let url = self.agent_pool_url(agent_pool_id)?;
        let payload = serde_json::to_vec(&UpdateDocument::from(options))?;
        debug!(
            agent_pool_id,
            workspaces = options.allowed_workspaces.len(),
            "Updating allowed workspaces"
        );

        let request = self
            .http
            .patch(url)
            .header(CONTENT_TYPE, MEDIA_TYPE)
            .body(payload);
        let body = self.execute(request)?;
        Self::decode_pool(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(hostname: &str) -> ProviderConfig {
        ProviderConfig {
            hostname: hostname.to_string(),
            token: Some("token".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_requires_token() {
        let err = TfeClient::new(&ProviderConfig::default()).unwrap_err();
        assert!(matches!(err, TfeError::Config(_)));
    }

    #[test]
    fn test_rejects_token_with_newline() {
        let mut config = config("tfe.example.com");
        config.token = Some("bad\ntoken".to_string());
        assert!(matches!(TfeClient::new(&config), Err(TfeError::Config(_))));
    }

    #[test]
    fn test_agent_pool_url() {
        let client = TfeClient::new(&config("tfe.example.com")).unwrap();
        assert_eq!(client.base_url().as_str(), "https://tfe.example.com/api/v2/");
        assert_eq!(
            client.agent_pool_url("apool-1").unwrap().as_str(),
            "https://tfe.example.com/api/v2/agent-pools/apool-1"
        );
        assert!(matches!(
            client.agent_pool_url("../organizations"),
            Err(TfeError::InvalidAgentPoolId)
        ));
    }

    #[test]
    fn test_check_status_mapping() {
        assert!(check_status(StatusCode::OK, "").is_ok());
        assert!(matches!(
            check_status(StatusCode::NOT_FOUND, ""),
            Err(TfeError::NotFound)
        ));
        assert!(matches!(
            check_status(StatusCode::UNAUTHORIZED, ""),
            Err(TfeError::Unauthorized)
        ));
        match check_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"errors":[{"title":"invalid","detail":"bad workspace"}]}"#,
        ) {
            Err(TfeError::Api { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "invalid: bad workspace");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        match check_status(StatusCode::BAD_GATEWAY, "<html/>") {
            Err(TfeError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
