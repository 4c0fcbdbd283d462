use std::fmt;
use std::sync::Arc;

use crate::error::Result;

use super::PackageFile;

/// A distributable unit from a repository.
///
/// Listing files may hit the disk (or anything else the repository is backed
/// by), so it is fallible and only called when the resolver needs it.
pub trait Package: Send + Sync + fmt::Debug {
    /// Package identifier (e.g. `Newtonsoft.Json`)
    fn id(&self) -> &str;

    /// Package version as published
    fn version(&self) -> &str;

    /// Files contained in the package
    fn files(&self) -> Result<Vec<PackageFile>>;
}

/// A package whose file list is held in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPackage {
    pub id: String,
    pub version: String,
    pub files: Vec<PackageFile>,
}

impl MemoryPackage {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            files: Vec::new(),
        }
    }

    /// Add a file to the package
    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.files.push(PackageFile::new(path));
        self
    }

    /// Add several files to the package
    pub fn with_files<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(paths.into_iter().map(PackageFile::new));
        self
    }
}

impl Package for MemoryPackage {
    fn id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn files(&self) -> Result<Vec<PackageFile>> {
        Ok(self.files.clone())
    }
}

/// Whether two handles point at the same package instance
pub(crate) fn same_package(a: &Arc<dyn Package>, b: &Arc<dyn Package>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

impl fmt::Display for dyn Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id(), self.version())
    }
}
