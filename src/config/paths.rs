//! Where fintrack keeps its files
//!
//! The base directory is `$FINTRACK_DATA_DIR` when set, otherwise the
//! platform data directory from `directories` (for example
//! `~/.local/share/fintrack` on Linux). Under it:
//!
//! ```text
//! config.json        settings
//! audit.log          change history, one JSON entry per line
//! data/<key>.json    the finance document
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{FinanceError, FinanceResult};

pub const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";

#[derive(Debug, Clone)]
pub struct FinancePaths {
    base_dir: PathBuf,
}

impl FinancePaths {
    /// Resolve the base directory from the environment or the platform
    pub fn new() -> FinanceResult<Self> {
        let from_env = std::env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty());
        let base_dir = match from_env {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("com", "fintrack", "Fintrack")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| {
                    FinanceError::Config(format!(
                        "No home directory found; set {} to choose a data directory",
                        DATA_DIR_ENV
                    ))
                })?,
        };
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Create the base and data directories if missing
    pub fn ensure_directories(&self) -> FinanceResult<()> {
        let data_dir = self.data_dir();
        std::fs::create_dir_all(&data_dir).map_err(|e| {
            FinanceError::Io(format!("Failed to create {}: {}", data_dir.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_under_base_dir() {
        let temp = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp.path());

        assert_eq!(paths.base_dir(), temp.path());
        assert_eq!(paths.data_dir(), temp.path().join("data"));
        assert_eq!(paths.settings_file(), temp.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp.path().join("audit.log"));
    }

    #[test]
    fn test_env_override() {
        let temp = TempDir::new().unwrap();

        std::env::set_var(DATA_DIR_ENV, temp.path());
        let paths = FinancePaths::new().unwrap();
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp.path());
    }

    #[test]
    fn test_ensure_directories_creates_nested_dirs() {
        let temp = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp.path().join("a").join("b"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().is_dir());
        assert!(paths.data_dir().is_dir());
    }
}
