//! Token lookup in the Terraform CLI credentials file.
//!
//! The file is JSON shaped like
//! `{"credentials": {"app.terraform.io": {"token": "..."}}}`.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use tfe_core::error::{Result, TfeError};
use tracing::debug;

#[derive(Debug, Deserialize, Default)]
struct CredentialsFile {
    #[serde(default)]
    credentials: IndexMap<String, CredentialEntry>,
}

#[derive(Debug, Deserialize)]
struct CredentialEntry {
    token: String,
}

/// Strip any scheme, path and trailing slash so `https://tfe.example.com/`
/// and `TFE.example.com` compare equal.
pub fn normalize_host(hostname: &str) -> String {
    let host = hostname
        .trim()
        .split_once("://")
        .map_or(hostname.trim(), |(_, rest)| rest);
    host.split('/').next().unwrap_or(host).to_ascii_lowercase()
}

/// Returns the token stored for `hostname`, or `None` when the file or the
/// host entry is absent.
pub fn token_for_host(path: &Path, hostname: &str) -> Result<Option<String>> {
    if !path.exists() {
        debug!(path = %path.display(), "No Terraform credentials file");
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)?;
    let file: CredentialsFile = serde_json::from_str(&contents).map_err(|e| {
        TfeError::Config(format!(
            "malformed credentials file {}: {e}",
            path.display()
        ))
    })?;

    let wanted = normalize_host(hostname);
    let token = file
        .credentials
        .into_iter()
        .find(|(host, _)| normalize_host(host) == wanted)
        .map(|(_, entry)| entry.token)
        .filter(|token| !token.is_empty());

    Ok(token)
}
