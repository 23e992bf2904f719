pub mod harness;
pub mod resolver;

pub use crate::domain::model::{ArchitectureIdentity, ArtifactPath, PlatformIdentity, PlatformInfo};
pub use crate::domain::ports::{LoadedModule, ModuleLoader, NativeEntryPoint};
pub use crate::utils::error::Result;
