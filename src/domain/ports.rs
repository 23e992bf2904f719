use crate::utils::error::{BoxError, Result};
use std::path::Path;

/// A single parameterless operation exported by a loaded module.
pub trait NativeEntryPoint {
    fn invoke(&self) -> std::result::Result<(), BoxError>;
}

/// A module opened from an artifact. Dropping it hands the module back to
/// the loader's retention policy.
pub trait LoadedModule {
    /// Fails with `EntryPointMissing` when `symbol` is not exported.
    fn entry_point(&self, symbol: &str) -> Result<Box<dyn NativeEntryPoint + '_>>;
}

pub trait ModuleLoader {
    /// Fails with `ArtifactNotFound` when nothing exists at `path`, and with
    /// `Load` when the file exists but cannot be opened in this process.
    fn load(&self, path: &Path) -> Result<Box<dyn LoadedModule>>;
}

impl<L: ModuleLoader + ?Sized> ModuleLoader for &L {
    fn load(&self, path: &Path) -> Result<Box<dyn LoadedModule>> {
        (**self).load(path)
    }
}
