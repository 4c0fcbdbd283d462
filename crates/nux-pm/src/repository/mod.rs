mod traits;
mod memory;
mod folder;
mod aggregate;

pub use traits::*;
pub use memory::*;
pub use folder::*;
pub use aggregate::*;
