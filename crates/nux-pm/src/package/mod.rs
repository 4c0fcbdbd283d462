// Package model
//
// The resolver only ever looks at a package's file list. Identity and
// metadata belong to whichever repository produced the package.

mod file;
mod package;

pub use file::PackageFile;
pub use package::{MemoryPackage, Package};

pub(crate) use package::same_package;
