use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "cxshift";

/// Resolves files inside the per-user application data directory.
///
/// - Windows: `%LOCALAPPDATA%\cxshift`
/// - macOS: `~/Library/Application Support/cxshift`
/// - other: `~/.local/share/cxshift`
#[derive(Clone, Debug)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        Self::at(Path::new(&base_path).join(APP_NAME))
    }

    /// Storage rooted at an explicit directory.
    pub fn at(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of `file_name` in the data directory, creating the directory (and
    /// any sub-directories named in `file_name`) on the way.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        let path = self.base_path.join(file_name);
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(path)
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
