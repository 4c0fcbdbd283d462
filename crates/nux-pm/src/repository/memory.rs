use std::sync::Arc;

use super::traits::{PackageIter, PackageSource};
use crate::error::Result;
use crate::package::Package;

/// Repository backed by an in-memory list of packages
#[derive(Debug, Default)]
pub struct MemoryRepository {
    name: String,
    packages: Vec<Arc<dyn Package>>,
}

impl MemoryRepository {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            packages: Vec::new(),
        }
    }

    /// Add a package (appended at the end of the scan order)
    pub fn add_package(&mut self, package: impl Package + 'static) {
        self.packages.push(Arc::new(package));
    }

    /// Builder form of [`add_package`](Self::add_package)
    pub fn with_package(mut self, package: impl Package + 'static) -> Self {
        self.add_package(package);
        self
    }
}

impl PackageSource for MemoryRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn packages(&self) -> Result<PackageIter<'_>> {
        Ok(Box::new(self.packages.iter().cloned().map(Ok)))
    }

    fn count(&self) -> Result<usize> {
        Ok(self.packages.len())
    }
}
