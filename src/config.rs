//! Defaults applied to newly created invitations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_DIR_NAME, DEFAULT_CALSCALE, DEFAULT_METHOD, DEFAULT_TRANSPARENCY, DEFAULT_VERSION,
    DEFAULTS_FILE_NAME,
};
use crate::error::{InviteError, InviteResult};

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_calscale() -> String {
    DEFAULT_CALSCALE.to_string()
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

fn default_transparency() -> String {
    DEFAULT_TRANSPARENCY.to_string()
}

/// Invitation defaults, stored at `<config dir>/ics-invite/defaults.toml`.
///
/// Every key is optional; missing keys fall back to the built-in values.
///
/// ```toml
/// product_id = "Acme Corp//Scheduler"
/// transparency = "TRANSPARENT"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_calscale")]
    pub calscale: String,

    #[serde(default = "default_method")]
    pub method: String,

    #[serde(default = "default_transparency")]
    pub transparency: String,
}

impl Default for InviteDefaults {
    fn default() -> Self {
        InviteDefaults {
            product_id: None,
            version: default_version(),
            calscale: default_calscale(),
            method: default_method(),
            transparency: default_transparency(),
        }
    }
}

impl InviteDefaults {
    pub fn config_path() -> InviteResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| InviteError::Config("Could not determine config directory".into()))?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir.join(DEFAULTS_FILE_NAME))
    }

    /// Load from the platform config path, or built-in defaults if absent.
    pub fn load() -> InviteResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, or built-in defaults if the file doesn't exist.
    #[tracing::instrument]
    pub fn load_from(path: &Path) -> InviteResult<Self> {
        if !path.exists() {
            tracing::debug!("no defaults file, using built-in defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> InviteResult<Self> {
        toml::from_str(content).map_err(|e| InviteError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> InviteResult<String> {
        toml::to_string_pretty(self).map_err(|e| InviteError::Config(e.to_string()))
    }
}
