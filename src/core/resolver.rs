use crate::domain::model::{ArtifactPath, BuildConfiguration, PlatformInfo};
use std::path::{Path, PathBuf};

pub const DEFAULT_ARTIFACT_NAME: &str = "addon.node";
pub const DEFAULT_ENTRY_SYMBOL: &str = "run";

/// Maps a platform to the prebuilt artifact location under `root`.
///
/// Only Windows builds are laid out by the build step, so every other
/// platform resolves to `None`:
///
/// - x64: `<root>/build/win/x64/Debug/<artifact>`
/// - anything else: `<root>/build/win/Win32/Debug/<artifact>`
pub fn resolve_artifact_path(root: &Path, artifact: &str, info: &PlatformInfo) -> Option<ArtifactPath> {
    if !info.platform.is_windows_like() {
        return None;
    }

    let relative: PathBuf = [
        "build",
        "win",
        info.arch.build_dir(),
        BuildConfiguration::Debug.as_str(),
        artifact,
    ]
    .iter()
    .collect();

    Some(ArtifactPath::new(root, relative))
}
