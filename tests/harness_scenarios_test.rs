use addon_harness::core::{LoadedModule, ModuleLoader, NativeEntryPoint};
use addon_harness::utils::error::BoxError;
use addon_harness::{
    ArchitectureIdentity, Harness, HarnessError, HarnessSettings, PlatformIdentity, PlatformInfo,
    Result, RunOutcome,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// In-memory stand-in for the OS loader: artifacts are registered by path
/// together with the symbols they export.
#[derive(Default)]
struct FakeLoader {
    artifacts: HashMap<PathBuf, Vec<&'static str>>,
    corrupt: Vec<PathBuf>,
    failing: bool,
    loads: RefCell<Vec<PathBuf>>,
    calls: Rc<Cell<usize>>,
}

impl FakeLoader {
    fn with_artifact(mut self, path: impl Into<PathBuf>, symbols: Vec<&'static str>) -> Self {
        self.artifacts.insert(path.into(), symbols);
        self
    }

    fn with_corrupt(mut self, path: impl Into<PathBuf>) -> Self {
        self.corrupt.push(path.into());
        self
    }

    fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

struct FakeModule {
    path: PathBuf,
    symbols: Vec<&'static str>,
    failing: bool,
    calls: Rc<Cell<usize>>,
}

struct FakeEntry {
    failing: bool,
    calls: Rc<Cell<usize>>,
}

impl NativeEntryPoint for FakeEntry {
    fn invoke(&self) -> std::result::Result<(), BoxError> {
        self.calls.set(self.calls.get() + 1);
        if self.failing {
            return Err("3 assertions failed".into());
        }
        Ok(())
    }
}

impl LoadedModule for FakeModule {
    fn entry_point(&self, symbol: &str) -> Result<Box<dyn NativeEntryPoint + '_>> {
        if !self.symbols.iter().any(|s| *s == symbol) {
            return Err(HarnessError::EntryPointMissing {
                path: self.path.clone(),
                symbol: symbol.to_string(),
            });
        }
        Ok(Box::new(FakeEntry {
            failing: self.failing,
            calls: Rc::clone(&self.calls),
        }))
    }
}

impl ModuleLoader for FakeLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn LoadedModule>> {
        self.loads.borrow_mut().push(path.to_path_buf());

        if self.corrupt.iter().any(|p| p == path) {
            return Err(HarnessError::Load {
                path: path.to_path_buf(),
                source: "%1 is not a valid Win32 application.".into(),
            });
        }

        let symbols = self
            .artifacts
            .get(path)
            .cloned()
            .ok_or_else(|| HarnessError::ArtifactNotFound {
                path: path.to_path_buf(),
            })?;

        Ok(Box::new(FakeModule {
            path: path.to_path_buf(),
            symbols,
            failing: self.failing,
            calls: Rc::clone(&self.calls),
        }))
    }
}

fn x64_path() -> PathBuf {
    ["build", "win", "x64", "Debug", "addon.node"].iter().collect()
}

fn win32_path() -> PathBuf {
    ["build", "win", "Win32", "Debug", "addon.node"].iter().collect()
}

fn windows(arch: ArchitectureIdentity) -> PlatformInfo {
    PlatformInfo::new(PlatformIdentity::WindowsLike, arch)
}

fn harness(loader: &FakeLoader) -> Harness<&FakeLoader> {
    Harness::with_settings(
        loader,
        HarnessSettings {
            root: PathBuf::new(),
            ..HarnessSettings::default()
        },
    )
}

#[test]
fn test_linux_is_noop() {
    let loader = FakeLoader::default();
    let harness = harness(&loader);
    let linux = PlatformInfo::from_names("linux", "x86_64");

    assert_eq!(harness.resolve(&linux), None);
    assert_eq!(harness.resolve_and_run(&linux).unwrap(), RunOutcome::NoOp);
    assert_eq!(harness.resolve_and_run(&linux).unwrap(), RunOutcome::NoOp);
    assert!(loader.loads.borrow().is_empty());
    assert_eq!(loader.calls.get(), 0);
}

#[test]
fn test_x64_invokes_run_once() {
    let loader = FakeLoader::default().with_artifact(x64_path(), vec!["run"]);
    let harness = harness(&loader);

    let outcome = harness
        .resolve_and_run(&windows(ArchitectureIdentity::X64))
        .unwrap();

    match outcome {
        RunOutcome::Invoked { artifact } => assert_eq!(artifact.as_path(), x64_path()),
        RunOutcome::NoOp => panic!("expected invocation"),
    }
    assert_eq!(loader.calls.get(), 1);
    assert_eq!(*loader.loads.borrow(), vec![x64_path()]);
}

#[test]
fn test_ia32_missing_artifact() {
    // Only the x64 build exists; there is no fallback to it.
    let loader = FakeLoader::default().with_artifact(x64_path(), vec!["run"]);
    let harness = harness(&loader);

    let err = harness
        .resolve_and_run(&windows(ArchitectureIdentity::Other))
        .unwrap_err();

    match err {
        HarnessError::ArtifactNotFound { path } => assert_eq!(path, win32_path()),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(loader.calls.get(), 0);
    assert_eq!(*loader.loads.borrow(), vec![win32_path()]);
}

#[test]
fn test_missing_entry_point() {
    let loader = FakeLoader::default().with_artifact(x64_path(), vec!["napi_register_module_v1"]);
    let harness = harness(&loader);

    let err = harness
        .resolve_and_run(&windows(ArchitectureIdentity::X64))
        .unwrap_err();

    match err {
        HarnessError::EntryPointMissing { path, symbol } => {
            assert_eq!(path, x64_path());
            assert_eq!(symbol, "run");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(loader.calls.get(), 0);
}

#[test]
fn test_load_error_keeps_detail() {
    let loader = FakeLoader::default().with_corrupt(x64_path());
    let harness = harness(&loader);

    let err = harness
        .resolve_and_run(&windows(ArchitectureIdentity::X64))
        .unwrap_err();

    assert!(matches!(err, HarnessError::Load { .. }));
    assert!(err.to_string().contains("not a valid Win32 application"));
}

#[test]
fn test_entry_point_fault_propagates() {
    let loader = FakeLoader::default()
        .with_artifact(win32_path(), vec!["run"])
        .failing();
    let harness = harness(&loader);

    let err = harness
        .resolve_and_run(&windows(ArchitectureIdentity::Other))
        .unwrap_err();

    match err {
        HarnessError::EntryPointExecution { symbol, source } => {
            assert_eq!(symbol, "run");
            assert_eq!(source.to_string(), "3 assertions failed");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(loader.calls.get(), 1);
}

#[test]
fn test_custom_entry_symbol() {
    let loader = FakeLoader::default().with_artifact(x64_path(), vec!["run_all"]);
    let harness = Harness::with_settings(
        &loader,
        HarnessSettings {
            root: PathBuf::new(),
            entry_symbol: "run_all".to_string(),
            ..HarnessSettings::default()
        },
    );

    assert!(harness
        .resolve_and_run(&windows(ArchitectureIdentity::X64))
        .is_ok());
    assert_eq!(loader.calls.get(), 1);
}
