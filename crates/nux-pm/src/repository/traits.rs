use std::sync::Arc;

use crate::error::Result;
use crate::package::Package;

/// Lazy, fallible sequence of packages in repository order
pub type PackageIter<'a> = Box<dyn Iterator<Item = Result<Arc<dyn Package>>> + 'a>;

/// Repository interface - read-only, ordered package source
///
/// Enumeration may be repeated (count, then iterate) and must yield the same
/// packages in the same order each time.
pub trait PackageSource: Send + Sync {
    /// Get a unique name for this repository
    fn name(&self) -> &str;

    /// Iterate over all packages in the repository
    fn packages(&self) -> Result<PackageIter<'_>>;

    /// Get the number of packages in the repository
    fn count(&self) -> Result<usize> {
        let mut total = 0;
        for package in self.packages()? {
            package?;
            total += 1;
        }
        Ok(total)
    }
}
