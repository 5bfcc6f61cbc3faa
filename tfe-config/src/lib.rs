//! Provider configuration for the TFE agent pool tooling.
//!
//! Settings are resolved from defaults, an optional YAML file, environment
//! variables and finally the Terraform CLI credentials file.

pub mod credentials;
pub mod provider_config;

pub use provider_config::{ProviderConfig, DEFAULT_HOSTNAME};
