use serde::{Deserialize, Serialize};

/// A file contained in a package, addressed by its path inside the package
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageFile {
    pub path: String,
}

impl PackageFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The base name of the file with any directory part stripped.
    ///
    /// Package archives use `/` while nuspec file lists use `\`, so both
    /// count as separators.
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.path)
    }
}

impl From<&str> for PackageFile {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
