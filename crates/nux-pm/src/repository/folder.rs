//! Folder repository - discovers packages from `.nupkg` archives in a directory.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use walkdir::WalkDir;
use zip::ZipArchive;

use super::traits::{PackageIter, PackageSource};
use crate::error::{ResolveError, Result};
use crate::package::{Package, PackageFile};

lazy_static! {
    static ref NUSPEC_ID: Regex = Regex::new(r"<id>\s*([^<]+?)\s*</id>").unwrap();
    static ref NUSPEC_VERSION: Regex = Regex::new(r"<version>\s*([^<]+?)\s*</version>").unwrap();
    static ref FILE_NAME: Regex =
        Regex::new(r"^(?P<id>.+?)\.(?P<version>\d+(?:\.\d+)*(?:-[0-9A-Za-z.\-]+)?)$").unwrap();
}

/// Folder repository - provides packages from `.nupkg` files in a directory
///
/// Package identity is read from the archive's `.nuspec` manifest when
/// present, otherwise from the `Id.Version.nupkg` file name. The file list is
/// only read from the archive when the resolver asks for it.
#[derive(Debug)]
pub struct FolderRepository {
    /// Repository name
    name: String,
    /// Directory path to scan for archives
    path: PathBuf,
    /// Discovered packages, sorted by archive path
    packages: Vec<Arc<dyn Package>>,
}

impl FolderRepository {
    /// Open a folder repository and scan it for packages
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_dir() {
            return Err(ResolveError::Repository(format!(
                "Package folder does not exist: {}",
                path.display()
            )));
        }

        let name = format!("folder ({})", path.display());
        let mut repo = Self {
            name,
            path,
            packages: Vec::new(),
        };
        repo.scan_directory();

        log::debug!("Found {} package(s) in {}", repo.packages.len(), repo.path.display());
        Ok(repo)
    }

    /// Directory this repository scans
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scan the directory for archives and read their identity
    fn scan_directory(&mut self) {
        for entry in WalkDir::new(&self.path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let is_nupkg = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("nupkg"))
                .unwrap_or(false);
            if !is_nupkg {
                continue;
            }

            match NupkgPackage::load(path) {
                Ok(package) => self.packages.push(Arc::new(package)),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }
    }
}

impl PackageSource for FolderRepository {
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

/// A package stored as a `.nupkg` archive on disk
#[derive(Debug, Clone)]
pub struct NupkgPackage {
    id: String,
    version: String,
    archive: PathBuf,
}

impl NupkgPackage {
    /// Read package identity from an archive
    pub fn load(path: &Path) -> Result<Self> {
        let mut archive = open_archive(path)?;

        let identity = match read_nuspec(&mut archive)? {
            Some(nuspec) => parse_nuspec_identity(&nuspec),
            None => None,
        };

        let (id, version) = identity
            .or_else(|| parse_file_name_identity(path))
            .ok_or_else(|| ResolveError::InvalidPackage {
                path: path.to_path_buf(),
                reason: "no package id or version found".to_string(),
            })?;

        Ok(Self {
            id,
            version,
            archive: path.to_path_buf(),
        })
    }

    /// Path to the archive on disk
    pub fn archive_path(&self) -> &Path {
        &self.archive
    }
}

impl Package for NupkgPackage {
    fn id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn files(&self) -> Result<Vec<PackageFile>> {
        let mut archive = open_archive(&self.archive)?;
        let mut files = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index)?;
            if is_package_file(entry.name()) {
                files.push(PackageFile::new(entry.name()));
            }
        }
        Ok(files)
    }
}

fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(ZipArchive::new(BufReader::new(file))?)
}

/// Entries that belong to the archive format rather than the package content
fn is_package_file(name: &str) -> bool {
    if name.ends_with('/') {
        return false;
    }
    if name == "[Content_Types].xml" || name.starts_with("_rels/") || name.starts_with("package/") {
        return false;
    }
    !is_manifest(name)
}

/// The manifest sits at the archive root
fn is_manifest(name: &str) -> bool {
    !name.contains('/') && name.to_lowercase().ends_with(".nuspec")
}

/// Read the root `.nuspec` manifest, if the archive has one
fn read_nuspec(archive: &mut ZipArchive<BufReader<File>>) -> Result<Option<String>> {
    let manifest = archive
        .file_names()
        .find(|name| is_manifest(name))
        .map(|name| name.to_string());

    let Some(manifest) = manifest else {
        return Ok(None);
    };

    let mut content = String::new();
    archive.by_name(&manifest)?.read_to_string(&mut content)?;
    Ok(Some(content))
}

fn parse_nuspec_identity(nuspec: &str) -> Option<(String, String)> {
    let id = NUSPEC_ID.captures(nuspec)?.get(1)?.as_str().to_string();
    let version = NUSPEC_VERSION.captures(nuspec)?.get(1)?.as_str().to_string();
    Some((id, version))
}

/// Split `Newtonsoft.Json.13.0.1.nupkg` into id and version
fn parse_file_name_identity(path: &Path) -> Option<(String, String)> {
    let stem = path.file_stem()?.to_str()?;
    let caps = FILE_NAME.captures(stem)?;
    Some((caps["id"].to_string(), caps["version"].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nuspec_identity() {
        let nuspec = r#"<?xml version="1.0"?>
<package xmlns="http://schemas.microsoft.com/packaging/2011/08/nuspec.xsd">
  <metadata>
    <id>Newtonsoft.Json</id>
    <version> 13.0.1 </version>
  </metadata>
</package>"#;
        assert_eq!(
            parse_nuspec_identity(nuspec),
            Some(("Newtonsoft.Json".to_string(), "13.0.1".to_string()))
        );
    }

    #[test]
    fn test_parse_nuspec_missing_version() {
        assert_eq!(parse_nuspec_identity("<metadata><id>Foo</id></metadata>"), None);
    }

    #[test]
    fn test_parse_file_name_identity() {
        assert_eq!(
            parse_file_name_identity(Path::new("/tmp/Newtonsoft.Json.13.0.1.nupkg")),
            Some(("Newtonsoft.Json".to_string(), "13.0.1".to_string()))
        );
        assert_eq!(
            parse_file_name_identity(Path::new("log4net.2.0.8.nupkg")),
            Some(("log4net".to_string(), "2.0.8".to_string()))
        );
        assert_eq!(
            parse_file_name_identity(Path::new("NUnit.3.0.0-beta-1.nupkg")),
            Some(("NUnit".to_string(), "3.0.0-beta-1".to_string()))
        );
    }

    #[test]
    fn test_parse_file_name_without_version() {
        assert_eq!(parse_file_name_identity(Path::new("package.nupkg")), None);
    }

    #[test]
    fn test_is_package_file() {
        assert!(is_package_file("lib/net45/Foo.dll"));
        assert!(is_package_file("tools/install.ps1"));
        assert!(!is_package_file("lib/"));
        assert!(!is_package_file("[Content_Types].xml"));
        assert!(!is_package_file("_rels/.rels"));
        assert!(!is_package_file("package/services/metadata/core-properties/x.psmdcp"));
        assert!(!is_package_file("Foo.nuspec"));
        assert!(is_package_file("content/Foo.nuspec"));
    }

    #[test]
    fn test_open_missing_folder() {
        let err = FolderRepository::open("/definitely/not/a/folder").unwrap_err();
        assert!(matches!(err, ResolveError::Repository(_)));
    }
}
