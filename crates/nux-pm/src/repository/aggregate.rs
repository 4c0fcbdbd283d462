use std::sync::Arc;

use super::traits::{PackageIter, PackageSource};
use crate::error::Result;

/// Chains several repositories in priority order (first = scanned first)
#[derive(Default)]
pub struct AggregateRepository {
    repositories: Vec<Arc<dyn PackageSource>>,
}

impl AggregateRepository {
    pub fn new() -> Self {
        Self {
            repositories: Vec::new(),
        }
    }

    /// Add a repository (will be scanned last)
    pub fn add_repository(&mut self, repo: Arc<dyn PackageSource>) {
        self.repositories.push(repo);
    }

    /// Get all repositories
    pub fn repositories(&self) -> &[Arc<dyn PackageSource>] {
        &self.repositories
    }
}

impl PackageSource for AggregateRepository {
    fn name(&self) -> &str {
        "aggregate"
    }

    fn packages(&self) -> Result<PackageIter<'_>> {
        let mut iters = Vec::with_capacity(self.repositories.len());
        for repo in &self.repositories {
            iters.push(repo.packages()?);
        }
        Ok(Box::new(iters.into_iter().flatten()))
    }

    fn count(&self) -> Result<usize> {
        let mut total = 0;
        for repo in &self.repositories {
            total += repo.count()?;
        }
        Ok(total)
    }
}
