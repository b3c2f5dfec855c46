//! `project.json` persistence with schema versioning.
//!
//! Files written before the version wrapper existed hold a bare project and
//! are read as version 0.

use std::path::Path;

use reelkit_core::{ReelError, Result};
use serde::{Deserialize, Serialize};

use crate::project::VideoProject;

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// File name used inside a project directory.
pub const PROJECT_FILE_NAME: &str = "project.json";

/// Versioned project file wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub version: u32,
    pub project: VideoProject,
    /// Version of reelkit that wrote this file.
    pub app_version: String,
}

impl ProjectFile {
    pub fn new(project: VideoProject) -> Self {
        Self {
            version: CURRENT_VERSION,
            project,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| ReelError::Serialization(format!("failed to serialize project: {e}")))
    }

    /// Parse, migrating older layouts first.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| ReelError::Serialization(format!("invalid JSON: {e}")))?;

        let version = raw.get("version").and_then(|v| v.as_u64()).unwrap_or(0);
        if version > CURRENT_VERSION as u64 {
            return Err(ReelError::Serialization(format!(
                "project file version {version} is newer than supported version {CURRENT_VERSION}"
            )));
        }

        let migrated = migrate(raw, version as u32)?;
        serde_json::from_value(migrated)
            .map_err(|e| ReelError::Serialization(format!("failed to parse project: {e}")))
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        tracing::debug!(path = %path.display(), "saved project");
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReelError::NotFound(format!("{} does not exist", path.display())));
        }
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

/// Step the document from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut data: serde_json::Value, from_version: u32) -> Result<serde_json::Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        match version {
            0 => {
                // v0 → v1: the whole document is the project
                data = serde_json::json!({
                    "version": 1,
                    "project": data,
                    "app_version": "0.0.0",
                });
                version = 1;
            }
            _ => {
                return Err(ReelError::Serialization(format!(
                    "no migration path from version {version}"
                )));
            }
        }
    }

    Ok(data)
}
