use crate::credentials;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tfe_core::error::{Result, TfeError};
use tfe_core::user_paths;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_HOSTNAME: &str = "app.terraform.io";

const ENV_HOSTNAME: &str = "TFE_HOSTNAME";
const ENV_TOKEN: &str = "TFE_TOKEN";
const ENV_SSL_SKIP_VERIFY: &str = "TFE_SSL_SKIP_VERIFY";

/// Connection settings for the TFE API.
///
/// Stored as YAML, by default in `<config dir>/tfe/config.yaml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Hostname of the TFE instance; may carry an explicit scheme
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// API token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Accept invalid TLS certificates
    #[serde(default)]
    pub ssl_skip_verify: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Keys we do not understand, kept so they can be reported
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

fn default_hostname() -> String {
    DEFAULT_HOSTNAME.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            token: None,
            ssl_skip_verify: false,
            timeout_secs: default_timeout_secs(),
            extra: IndexMap::new(),
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("hostname", &self.hostname)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("ssl_skip_verify", &self.ssl_skip_verify)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl ProviderConfig {
    /// Resolve the full configuration.
    ///
    /// An explicit `path` must exist; the default path is optional. After the
    /// file, `TFE_HOSTNAME`, `TFE_TOKEN` and `TFE_SSL_SKIP_VERIFY` are applied,
    /// and a still-missing token is looked up in the Terraform credentials
    /// file for the resolved hostname.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(TfeError::Config(format!(
                        "configuration file not found: {}",
                        path.display()
                    )));
                }
                Self::load_from_path(path)?
            }
            None => {
                let default_path = user_paths::provider_config_path()?;
                if default_path.exists() {
                    Self::load_from_path(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());

        if config.token.is_none() {
            let credentials_path = user_paths::terraform_credentials_path()?;
            config.token = credentials::token_for_host(&credentials_path, &config.hostname)?;
            if config.token.is_some() {
                debug!(path = %credentials_path.display(), "Using token from Terraform credentials file");
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific YAML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml_ng::from_str(&contents)?;
        if !config.extra.is_empty() {
            let keys: Vec<&String> = config.extra.keys().collect();
            warn!(path = %path.display(), ?keys, "Ignoring unknown configuration keys");
        }
        Ok(config)
    }

    /// Save configuration to a specific YAML file
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;
        std::fs::write(path, yaml)?;

        Ok(())
    }

    /// Apply environment overrides. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(hostname) = lookup(ENV_HOSTNAME) {
            self.hostname = hostname;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(skip) = lookup(ENV_SSL_SKIP_VERIFY) {
            self.ssl_skip_verify = parse_bool(&skip);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.hostname.trim().is_empty() {
            return Err(TfeError::Config("hostname must not be empty".to_string()));
        }
        if self.token.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Err(TfeError::Config(format!(
                "no API token configured for {}; set {ENV_TOKEN} or add it to the Terraform credentials file",
                self.hostname
            )));
        }
        if self.timeout_secs == 0 {
            return Err(TfeError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        self.base_url().map(|_| ())
    }

    /// Base URL of the v2 API, always ending in `/api/v2/`.
    pub fn base_url(&self) -> Result<Url> {
        let host = self.hostname.trim().trim_end_matches('/');
        let raw = if host.contains("://") {
            format!("{host}/api/v2/")
        } else {
            format!("https://{host}/api/v2/")
        };
        Url::parse(&raw)
            .map_err(|e| TfeError::Config(format!("invalid hostname {:?}: {e}", self.hostname)))
    }
}
