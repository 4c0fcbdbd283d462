//! The result of a resolution run and the ways to present it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::console::Console;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::package::{same_package, Package};
use crate::resolver::fold_case;

/// Assembly name -> packages containing it, in repository scan order.
///
/// Every requested assembly has an entry; assemblies that were not found map
/// to an empty list.
pub struct AssemblyToPackageMapping {
    entries: IndexMap<String, Vec<Arc<dyn Package>>>,
    console: Arc<dyn Console>,
    file_system: Arc<dyn FileSystem>,
}

impl AssemblyToPackageMapping {
    pub fn new(
        entries: IndexMap<String, Vec<Arc<dyn Package>>>,
        console: Arc<dyn Console>,
        file_system: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            entries,
            console,
            file_system,
        }
    }

    /// Candidates for an assembly, looked up ignoring case
    pub fn get(&self, assembly: &str) -> Option<&[Arc<dyn Package>]> {
        let key = fold_case(assembly);
        self.entries
            .iter()
            .find(|(name, _)| fold_case(name) == key)
            .map(|(_, packages)| packages.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Arc<dyn Package>])> {
        self.entries
            .iter()
            .map(|(name, packages)| (name.as_str(), packages.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assemblies with at least one candidate
    pub fn resolved(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, packages)| !packages.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Assemblies no package provides
    pub fn unresolved(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, packages)| packages.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Assemblies provided by more than one distinct package
    pub fn ambiguous(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, packages)| {
                packages
                    .iter()
                    .any(|p| !same_package(p, &packages[0]))
            })
            .map(|(name, _)| name)
            .collect()
    }

    /// The first candidate of each resolved assembly, without repeats
    pub fn preferred_packages(&self) -> Vec<Arc<dyn Package>> {
        let mut preferred: Vec<Arc<dyn Package>> = Vec::new();
        for packages in self.entries.values() {
            if let Some(first) = packages.first() {
                if !preferred.iter().any(|p| same_package(p, first)) {
                    preferred.push(Arc::clone(first));
                }
            }
        }
        preferred
    }

    /// Write one line per assembly to the console, warning for those not found
    pub fn output_to_console(&self) {
        for (assembly, packages) in self.iter() {
            if packages.is_empty() {
                self.console.write_warning(&format!(
                    "Could not find a package containing {}",
                    assembly
                ));
                continue;
            }

            let names: Vec<String> = packages.iter().map(|p| p.to_string()).collect();
            self.console
                .write_line(&format!("{}: {}", assembly, names.join(", ")));
        }
    }

    /// Serializable view of the mapping
    pub fn to_report(&self) -> MappingReport {
        MappingReport {
            assemblies: self
                .iter()
                .map(|(assembly, packages)| {
                    (
                        assembly.to_string(),
                        packages.iter().map(|p| PackageRef::from(&**p)).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Write the preferred packages as a `packages.config` document.
    ///
    /// The path is relative to the file system root. Unresolved assemblies
    /// contribute nothing.
    pub fn write_packages_config(&self, path: &Path) -> Result<()> {
        let packages = self.preferred_packages();
        let document = render_packages_config(&packages);
        self.file_system.add_file(path, document.as_bytes())?;
        self.console.write_line(&format!(
            "Wrote {} package(s) to {}",
            packages.len(),
            self.file_system.root().join(path).display()
        ));
        Ok(())
    }
}

impl fmt::Debug for AssemblyToPackageMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl PartialEq for AssemblyToPackageMapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().zip(other.entries.iter()).all(
                |((name, packages), (other_name, other_packages))| {
                    name == other_name
                        && packages.len() == other_packages.len()
                        && packages
                            .iter()
                            .zip(other_packages)
                            .all(|(a, b)| same_package(a, b))
                },
            )
    }
}

/// Package identity as it appears in reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRef {
    pub id: String,
    pub version: String,
}

impl From<&dyn Package> for PackageRef {
    fn from(package: &dyn Package) -> Self {
        Self {
            id: package.id().to_string(),
            version: package.version().to_string(),
        }
    }
}

/// Assembly name -> candidate packages, ready for serialization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingReport {
    pub assemblies: IndexMap<String, Vec<PackageRef>>,
}

impl MappingReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn render_packages_config(packages: &[Arc<dyn Package>]) -> String {
    let mut document = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<packages>\n");
    for package in packages {
        document.push_str(&format!(
            "  <package id=\"{}\" version=\"{}\" />\n",
            escape_attribute(package.id()),
            escape_attribute(package.version())
        ));
    }
    document.push_str("</packages>\n");
    document
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
