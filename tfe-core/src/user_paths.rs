//! User directory helpers for the TFE agent pool tooling.

use crate::error::{Result, TfeError};
use std::path::PathBuf;

/// Get the user's configuration directory for this tool.
///
/// Returns:
/// - Linux: `~/.config/tfe` or `$XDG_CONFIG_HOME/tfe`
/// - macOS: `~/Library/Application Support/tfe`
/// - Windows: `%APPDATA%\tfe`
#[must_use = "configuration directory path should be used"]
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("tfe"))
        .ok_or_else(|| TfeError::Internal("Could not determine config directory".to_string()))
}

/// Get the default provider configuration file, `<config dir>/config.yaml`.
#[must_use = "configuration path should be used"]
pub fn provider_config_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join("config.yaml"))
}

/// Get the Terraform CLI credentials file.
///
/// `TF_CLI_CREDENTIALS_FILE` wins when set; otherwise
/// `~/.terraform.d/credentials.tfrc.json`.
#[must_use = "credentials path should be used"]
pub fn terraform_credentials_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("TF_CLI_CREDENTIALS_FILE") {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    home_dir().map(|home| home.join(".terraform.d").join("credentials.tfrc.json"))
}

#[must_use = "home directory path should be used"]
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| TfeError::Internal("Could not determine home directory".to_string()))
}
