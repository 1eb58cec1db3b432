use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Directory holding the studio database and configuration.
pub const STUDIO_DIR: &str = ".cardstudio";
pub const CONFIG_FILE: &str = "config.yaml";

/// What to do when a freshly drawn share code is already in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShareCodePolicy {
    /// Redraw, up to a bounded number of attempts.
    #[default]
    Regenerate,
    /// Keep the first draw even if it collides.
    AllowDuplicates,
}

/// Project configuration, stored as YAML in `.cardstudio/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Database file name inside the studio directory.
    pub database: String,
    pub share_codes: ShareCodePolicy,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            database: "studio.db".to_string(),
            share_codes: ShareCodePolicy::default(),
        }
    }
}

impl StudioConfig {
    /// Load from the studio directory. A missing file yields the defaults.
    pub fn load(studio_dir: &Path) -> Result<Self> {
        let path = studio_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;
        let config = serde_yaml::from_str(&raw)?;
        Ok(config)
    }

    pub fn save(&self, studio_dir: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(studio_dir.join(CONFIG_FILE), yaml)?;
        Ok(())
    }
}
