//! File-system capability used to persist resolution artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Where result artifacts (e.g. `packages.config`) get written
pub trait FileSystem: Send + Sync {
    /// Root directory that relative paths resolve against
    fn root(&self) -> &Path;

    /// Check whether a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Create or overwrite a file
    fn add_file(&self, path: &Path, contents: &[u8]) -> Result<()>;
}

/// File system rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct PhysicalFileSystem {
    root: PathBuf,
}

impl PhysicalFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn full_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl FileSystem for PhysicalFileSystem {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, path: &Path) -> bool {
        self.full_path(path).exists()
    }

    fn add_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, contents)?;
        log::debug!("Wrote {}", full_path.display());
        Ok(())
    }
}
