//! Capabilities a project file exposes to reference-rewriting tooling.
//!
//! Nothing in the resolver touches a project; these traits let callers derive
//! the assembly list to resolve and find the references a result applies to.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// A reference declared by a project
pub trait Reference {
    /// Name part of the include (e.g. `log4net`)
    fn include_name(&self) -> &str;

    /// Version part of the include, if one is declared
    fn include_version(&self) -> Option<&str>;
}

/// A reference to a loose binary
pub trait BinaryReference: Reference {
    /// Whether this reference points at the given assembly file name
    fn is_for_assembly(&self, assembly_file_name: &str) -> bool;

    fn hint_path(&self) -> Option<String>;

    /// Note: the owning project must be saved for this change to persist
    fn set_hint_path(&mut self, value: &str);
}

/// A project file with binary and project references
pub trait VsProject {
    fn binary_references(&self) -> Vec<&dyn BinaryReference>;

    fn project_references(&self) -> Vec<&dyn Reference>;

    fn assembly_name(&self) -> &str;

    fn project_name(&self) -> &str;

    fn project_directory(&self) -> &Path;

    fn save(&mut self) -> Result<()>;

    fn add_file(&mut self, path: &Path) -> Result<()>;
}

/// Assembly file names to resolve for a project's binary references.
///
/// Uses the hint path's file name when one is set, `{include_name}.dll`
/// otherwise. Duplicates are left in place; the resolver warns about them.
pub fn requested_assemblies(project: &dyn VsProject) -> Vec<String> {
    project
        .binary_references()
        .into_iter()
        .map(|reference| {
            reference
                .hint_path()
                .and_then(|hint| {
                    PathBuf::from(hint.replace('\\', "/"))
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                })
                .unwrap_or_else(|| format!("{}.dll", reference.include_name()))
        })
        .collect()
}

/// Binary references of a project that point at the given assembly
pub fn references_for_assembly<'a>(
    project: &'a dyn VsProject,
    assembly_file_name: &str,
) -> Vec<&'a dyn BinaryReference> {
    project
        .binary_references()
        .into_iter()
        .filter(|reference| reference.is_for_assembly(assembly_file_name))
        .collect()
}
