//! Helpers for running the `tfe-pool` binary in isolation.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;
use tfe_config::ProviderConfig;

pub const STATE_FILE: &str = "tfe-pool.state.json";

/// A `tfe-pool` command whose home, config dir and credentials all live
/// under `dir`, with no API token available.
pub fn tfe_pool(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tfe-pool").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env("TF_CLI_CREDENTIALS_FILE", dir.path().join("no-credentials.json"))
        .env("LOG_OUTPUT", "none")
        .env_remove("TFE_TOKEN")
        .env_remove("TFE_HOSTNAME")
        .env_remove("TFE_SSL_SKIP_VERIFY")
        .env_remove("RUST_LOG")
        .env_remove("HTTP_PROXY")
        .env_remove("HTTPS_PROXY")
        .env_remove("ALL_PROXY")
        .env_remove("http_proxy")
        .env_remove("https_proxy")
        .env_remove("all_proxy");
    cmd
}

/// Same as [`tfe_pool`] but pointed at the API described by `config`.
pub fn tfe_pool_against(dir: &TempDir, config: &ProviderConfig) -> Command {
    let mut cmd = tfe_pool(dir);
    cmd.env("TFE_HOSTNAME", &config.hostname)
        .env("TFE_TOKEN", config.token.as_deref().unwrap_or_default());
    cmd
}

pub fn state_path(dir: &TempDir) -> PathBuf {
    dir.path().join(STATE_FILE)
}

pub fn read_state(dir: &TempDir) -> serde_json::Value {
    let content = std::fs::read_to_string(state_path(dir)).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// Workspace IDs recorded in the state file, or `None` without a resource.
pub fn state_workspaces(dir: &TempDir) -> Option<Vec<String>> {
    if !state_path(dir).exists() {
        return None;
    }
    let state = read_state(dir);
    let resource = state.get("resource")?;
    Some(
        resource["attributes"]["allowed_workspace_ids"]
            .as_array()
            .unwrap()
            .iter()
            .map(|id| id.as_str().unwrap().to_string())
            .collect(),
    )
}
