use std::sync::Arc;

use indexmap::IndexMap;

use super::AssemblyRequestSet;
use crate::console::Console;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::mapping::AssemblyToPackageMapping;
use crate::package::Package;
use crate::repository::PackageSource;

/// Finds the packages of a source that contain a set of assemblies.
pub struct AssemblyResolver {
    requests: AssemblyRequestSet,
    source: Arc<dyn PackageSource>,
    file_system: Arc<dyn FileSystem>,
    console: Arc<dyn Console>,
}

impl AssemblyResolver {
    /// Create a resolver for the given assembly file names.
    ///
    /// Names requested more than once (ignoring case) are collapsed and
    /// reported with one warning each. The file system is only handed on to
    /// the resulting mapping.
    pub fn new<I, S>(
        assemblies: I,
        source: Arc<dyn PackageSource>,
        file_system: Arc<dyn FileSystem>,
        console: Arc<dyn Console>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requests = AssemblyRequestSet::new(assemblies)?;

        for assembly in requests.duplicates() {
            console.write_warning(&format!(
                "Same assembly resolution will be used for both assembly references for {}",
                assembly
            ));
        }

        Ok(Self {
            requests,
            source,
            file_system,
            console,
        })
    }

    /// The de-duplicated assembly names this resolver looks for
    pub fn requests(&self) -> &AssemblyRequestSet {
        &self.requests
    }

    /// Scan the source and map each requested assembly to the packages
    /// containing it, in scan order.
    ///
    /// With `exhaustive` unset and a single requested assembly, the scan stops
    /// at the first package that contains it. With several assemblies the
    /// whole source is always scanned.
    pub fn resolve(&self, exhaustive: bool) -> Result<AssemblyToPackageMapping> {
        let mut resolved: IndexMap<String, Vec<Arc<dyn Package>>> = self
            .requests
            .iter()
            .map(|assembly| (assembly.to_string(), Vec::new()))
            .collect();

        if self.requests.is_empty() {
            return Ok(self.mapping(resolved));
        }

        let stop_at_first = !exhaustive && self.requests.len() == 1;
        let total = self.source.count()?;
        log::debug!(
            "Resolving {} assembly(ies) against {} package(s) from {}",
            self.requests.len(),
            total,
            self.source.name()
        );

        for (index, package) in self.source.packages()?.enumerate() {
            let package = package?;
            self.console
                .write_line(&format!("Checking package {} of {}", index + 1, total));

            for file in package.files()? {
                let Some(position) = self.requests.index_of(file.file_name()) else {
                    continue;
                };

                if let Some((assembly, candidates)) = resolved.get_index_mut(position) {
                    log::trace!("{} found in {} at {}", assembly, package.id(), file.path);
                    candidates.push(Arc::clone(&package));
                }

                if stop_at_first {
                    return Ok(self.mapping(resolved));
                }
            }
        }

        Ok(self.mapping(resolved))
    }

    fn mapping(&self, resolved: IndexMap<String, Vec<Arc<dyn Package>>>) -> AssemblyToPackageMapping {
        AssemblyToPackageMapping::new(
            resolved,
            Arc::clone(&self.console),
            Arc::clone(&self.file_system),
        )
    }
}
