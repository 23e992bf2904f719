use crate::domain::ports::{LoadedModule, ModuleLoader, NativeEntryPoint};
use crate::utils::error::{BoxError, HarnessError, Result};
use libloading::{Library, Symbol};
use std::io;
use std::mem::ManuallyDrop;
use std::path::{Path, PathBuf};

type EntryFn = unsafe extern "C" fn();

/// Opens artifacts with the platform's dynamic loader (`LoadLibraryW` on
/// Windows, `dlopen` elsewhere).
///
/// Libraries are never unloaded: a module may register process-wide state
/// while it is open, so its code has to stay mapped for the process lifetime.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicLibraryLoader;

impl DynamicLibraryLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ModuleLoader for DynamicLibraryLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn LoadedModule>> {
        match std::fs::metadata(path) {
            Ok(_) => {}
            // ENOTDIR: some directory on the way to the artifact is a regular file.
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                return Err(HarnessError::ArtifactNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => {
                return Err(HarnessError::Load {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        }

        tracing::debug!("opening {}", path.display());

        // SAFETY: loading runs the library's initialisers. The artifact is a
        // trusted build output of the package under test.
        let library = unsafe { Library::new(path) }.map_err(|e| HarnessError::Load {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        Ok(Box::new(DynamicModule {
            path: path.to_path_buf(),
            library: ManuallyDrop::new(library),
        }))
    }
}

struct DynamicModule {
    path: PathBuf,
    library: ManuallyDrop<Library>,
}

impl LoadedModule for DynamicModule {
    fn entry_point(&self, symbol: &str) -> Result<Box<dyn NativeEntryPoint + '_>> {
        // SAFETY: the entry point contract is `extern "C" fn()`.
        let func: Symbol<'_, EntryFn> = unsafe { self.library.get(symbol.as_bytes()) }.map_err(|e| {
            tracing::debug!("symbol lookup for `{}` failed: {}", symbol, e);
            HarnessError::EntryPointMissing {
                path: self.path.clone(),
                symbol: symbol.to_string(),
            }
        })?;

        Ok(Box::new(DynamicEntryPoint { func }))
    }
}

struct DynamicEntryPoint<'lib> {
    func: Symbol<'lib, EntryFn>,
}

impl NativeEntryPoint for DynamicEntryPoint<'_> {
    fn invoke(&self) -> std::result::Result<(), BoxError> {
        // SAFETY: the symbol was resolved with the `extern "C" fn()` signature
        // and the library outlives this borrow.
        unsafe { (*self.func)() };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("addon.node");

        match DynamicLibraryLoader::new().load(&path) {
            Err(HarnessError::ArtifactNotFound { path: reported }) => assert_eq!(reported, path),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("loaded a file that does not exist"),
        }
    }

    #[test]
    fn test_malformed_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("addon.node");
        std::fs::write(&path, b"definitely not a shared library").unwrap();

        match DynamicLibraryLoader::new().load(&path) {
            Err(HarnessError::Load { path: reported, source }) => {
                assert_eq!(reported, path);
                assert!(!source.to_string().is_empty());
            }
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("loaded a malformed artifact"),
        }
    }
}
