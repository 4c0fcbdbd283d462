pub mod config;
pub mod console;
pub mod error;
pub mod fs;
pub mod mapping;
pub mod package;
pub mod project;
pub mod repository;
pub mod resolver;

pub use config::NuxConfig;
pub use console::{BufferedConsole, Console, ConsoleMessage, LogConsole, TermConsole, Verbosity};
pub use error::{ResolveError, Result};
pub use fs::{FileSystem, PhysicalFileSystem};
pub use mapping::{AssemblyToPackageMapping, MappingReport, PackageRef};
pub use package::{MemoryPackage, Package, PackageFile};
pub use project::{BinaryReference, Reference, VsProject};
pub use repository::{AggregateRepository, FolderRepository, MemoryRepository, PackageSource};
pub use resolver::{AssemblyRequestSet, AssemblyResolver};
