//! Path management for ColorSnaps
//!
//! Resolves the config directory and the files kept inside it.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static PATHS: OnceCell<Arc<Paths>> = OnceCell::new();

/// Filesystem locations used by the application
#[derive(Debug, Clone)]
pub struct Paths {
    config_dir: PathBuf,
}

impl Paths {
    /// Initialize the paths singleton
    pub fn init(config: Option<PathBuf>) -> Result<Arc<Paths>> {
        let paths = PATHS.get_or_try_init(|| {
            let paths = Self::new(config)?;
            Ok::<_, anyhow::Error>(Arc::new(paths))
        })?;
        Ok(Arc::clone(paths))
    }

    /// Get the global paths instance
    pub fn get() -> Result<Arc<Paths>> {
        PATHS.get().map(Arc::clone).context("Paths not initialized")
    }

    /// Build paths rooted at `config_override`, or the platform config dir
    pub fn new(config_override: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_override {
            Some(path) => path,
            None => directories::ProjectDirs::from("", "", "colorsnaps")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".colorsnaps")),
        };

        let paths = Self { config_dir };
        paths.create_directories()?;

        Ok(paths)
    }

    fn create_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir).with_context(|| {
            format!("Failed to create config dir {}", self.config_dir.display())
        })?;
        std::fs::create_dir_all(self.storage_dir())?;
        Ok(())
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the settings file path
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Directory backing the key-value palette storage
    pub fn storage_dir(&self) -> PathBuf {
        self.config_dir.join("storage")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_creation() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("colorsnaps");

        // init() is process-wide, so build a plain instance here
        let paths = Paths::new(Some(root.clone())).unwrap();

        assert_eq!(paths.config_dir(), root.as_path());
        assert!(paths.storage_dir().is_dir());
        assert_eq!(paths.settings_path(), root.join("settings.json"));
    }
}
