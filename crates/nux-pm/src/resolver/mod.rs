//! Assembly-to-package resolution.
//!
//! Scans the packages of a [`PackageSource`](crate::repository::PackageSource)
//! for files named like the requested assemblies and collects, per assembly,
//! every package that ships one.

mod request;
mod resolver;

pub use request::AssemblyRequestSet;
pub use resolver::AssemblyResolver;

pub(crate) use request::fold_case;
