use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformIdentity {
    WindowsLike,
    Other,
}

impl PlatformIdentity {
    /// Accepts both Rust (`windows`) and Node (`win32`) spellings.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "windows" | "win32" | "win64" => PlatformIdentity::WindowsLike,
            _ => PlatformIdentity::Other,
        }
    }

    pub fn is_windows_like(self) -> bool {
        self == PlatformIdentity::WindowsLike
    }
}

impl fmt::Display for PlatformIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformIdentity::WindowsLike => write!(f, "windows"),
            PlatformIdentity::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchitectureIdentity {
    X64,
    /// Anything that is not x64; laid out as a 32-bit build.
    Other,
}

impl ArchitectureIdentity {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "x64" | "x86_64" | "amd64" => ArchitectureIdentity::X64,
            _ => ArchitectureIdentity::Other,
        }
    }

    /// Directory name used by the Windows build output.
    pub fn build_dir(self) -> &'static str {
        match self {
            ArchitectureIdentity::X64 => "x64",
            ArchitectureIdentity::Other => "Win32",
        }
    }
}

impl fmt::Display for ArchitectureIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchitectureIdentity::X64 => write!(f, "x64"),
            ArchitectureIdentity::Other => write!(f, "ia32"),
        }
    }
}

/// Platform and architecture the harness resolves for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub platform: PlatformIdentity,
    pub arch: ArchitectureIdentity,
}

impl PlatformInfo {
    pub fn new(platform: PlatformIdentity, arch: ArchitectureIdentity) -> Self {
        Self { platform, arch }
    }

    /// Reads the identity of the running process.
    pub fn detect() -> Self {
        Self::new(
            PlatformIdentity::from_name(std::env::consts::OS),
            ArchitectureIdentity::from_name(std::env::consts::ARCH),
        )
    }

    pub fn from_names(platform: &str, arch: &str) -> Self {
        Self::new(
            PlatformIdentity::from_name(platform),
            ArchitectureIdentity::from_name(arch),
        )
    }
}

impl fmt::Display for PlatformInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.platform, self.arch)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildConfiguration {
    #[default]
    Debug,
}

impl BuildConfiguration {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildConfiguration::Debug => "Debug",
        }
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of a prebuilt artifact. Built once by the resolver and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPath {
    full: PathBuf,
    relative: PathBuf,
}

impl ArtifactPath {
    pub(crate) fn new(root: &Path, relative: PathBuf) -> Self {
        Self {
            full: root.join(&relative),
            relative,
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.full
    }

    /// The `build/win/...` portion, independent of the root directory.
    pub fn relative(&self) -> &Path {
        &self.relative
    }
}

impl AsRef<Path> for ArtifactPath {
    fn as_ref(&self) -> &Path {
        &self.full
    }
}

impl fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full.display())
    }
}
