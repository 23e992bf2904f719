pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::DynamicLibraryLoader;
pub use config::HarnessConfig;
pub use crate::core::harness::{Harness, HarnessSettings, RunOutcome};
pub use domain::model::{ArchitectureIdentity, ArtifactPath, PlatformIdentity, PlatformInfo};
pub use utils::error::{HarnessError, Result};

/// Resolves the addon for the running process under `root` and calls its
/// `run` entry point with the system loader.
pub fn resolve_and_run(root: impl Into<std::path::PathBuf>) -> Result<RunOutcome> {
    let settings = HarnessSettings {
        root: root.into(),
        ..HarnessSettings::default()
    };
    Harness::with_settings(DynamicLibraryLoader::new(), settings).resolve_and_run(&PlatformInfo::detect())
}
