use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tfe_core::error::{Result, TfeError};
use tfe_provider::ResourceData;

const STATE_VERSION: u32 = 1;

/// The resource this state file tracks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceState {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(flatten)]
    pub data: ResourceData,
}

/// Local state, stored as JSON next to where the tool runs.
#[derive(Debug, Serialize, Deserialize)]
pub struct StateFile {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceState>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            resource: None,
        }
    }
}

impl StateFile {
    /// Load state; a missing file is an empty state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(StateFile::default());
        }
        let content = fs::read_to_string(path)?;
        let state: StateFile = serde_json::from_str(&content)?;
        if state.version != STATE_VERSION {
            return Err(TfeError::Serialization(format!(
                "unsupported state version {} in {} (expected {STATE_VERSION})",
                state.version,
                path.display()
            )));
        }
        Ok(state)
    }

    /// Write state via a temporary file so a crash never leaves half a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn set(&mut self, resource_type: &str, data: Option<ResourceData>) {
        self.resource = data.map(|data| ResourceState {
            resource_type: resource_type.to_string(),
            data,
        });
    }
}
