use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{StudioConfig, STUDIO_DIR};
use crate::error::{Result, StudioError};
use crate::storage::SqliteStore;
use crate::studio::{Studio, TracingObserver};

/// A directory containing `.cardstudio/`.
pub struct Project {
    root: PathBuf,
    config: StudioConfig,
}

impl Project {
    /// Initialize a new studio in `root` with default configuration
    pub fn init(root: &Path) -> Result<Self> {
        let studio_dir = root.join(STUDIO_DIR);

        if studio_dir.exists() {
            return Err(StudioError::AlreadyInitialized);
        }

        fs::create_dir_all(&studio_dir)?;

        let config = StudioConfig::default();
        config.save(&studio_dir)?;

        let project = Self {
            root: root.to_path_buf(),
            config,
        };
        // Create the database so `open` finds a complete project.
        SqliteStore::open(&project.database_path())?;

        Ok(project)
    }

    /// Open an existing studio
    pub fn open(root: &Path) -> Result<Self> {
        let studio_dir = root.join(STUDIO_DIR);

        if !studio_dir.is_dir() {
            return Err(StudioError::NotInitialized);
        }

        let config = StudioConfig::load(&studio_dir)?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    /// Find the project root by looking for .cardstudio/ or .git/
    pub fn find_root(start: &Path) -> PathBuf {
        let mut current = start;
        loop {
            if current.join(STUDIO_DIR).exists() || current.join(".git").exists() {
                return current.to_path_buf();
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => return start.to_path_buf(),
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn studio_dir(&self) -> PathBuf {
        self.root.join(STUDIO_DIR)
    }

    pub fn database_path(&self) -> PathBuf {
        self.studio_dir().join(&self.config.database)
    }

    /// Load the studio state, logging every transition.
    pub fn studio(&self) -> Result<Studio<SqliteStore>> {
        let store = SqliteStore::open(&self.database_path())?;
        let mut studio = Studio::load(store, &self.config)?;
        studio.add_observer(TracingObserver);
        Ok(studio)
    }
}
