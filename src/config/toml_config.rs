use crate::core::harness::HarnessSettings;
use crate::core::resolver::{DEFAULT_ARTIFACT_NAME, DEFAULT_ENTRY_SYMBOL};
use crate::domain::model::{ArchitectureIdentity, PlatformIdentity, PlatformInfo};
use crate::utils::error::{HarnessError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub artifact: ArtifactConfig,
    #[serde(default)]
    pub platform: PlatformOverride,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Package directory that contains `build/`.
    pub root: Option<PathBuf>,
    pub name: Option<String>,
    pub entry_symbol: Option<String>,
}

/// Simulated platform identity; unset fields fall back to the running process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformOverride {
    pub name: Option<String>,
    pub arch: Option<String>,
}

impl HarnessConfig {
    /// Loads a config file. A relative `artifact.root` is taken relative to
    /// the directory holding the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| HarnessError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let mut config = Self::from_toml_str(&content)?;

        if let (Some(root), Some(base)) = (config.artifact.root.as_mut(), path.parent()) {
            if root.is_relative() {
                *root = base.join(&*root);
            }
        }

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HarnessError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HarnessError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn root(&self) -> PathBuf {
        self.artifact.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn artifact_name(&self) -> &str {
        self.artifact.name.as_deref().unwrap_or(DEFAULT_ARTIFACT_NAME)
    }

    pub fn entry_symbol(&self) -> &str {
        self.artifact
            .entry_symbol
            .as_deref()
            .unwrap_or(DEFAULT_ENTRY_SYMBOL)
    }

    pub fn settings(&self) -> HarnessSettings {
        HarnessSettings {
            root: self.root(),
            artifact: self.artifact_name().to_string(),
            entry_symbol: self.entry_symbol().to_string(),
        }
    }

    /// The detected identity with any configured overrides applied.
    pub fn platform_info(&self) -> PlatformInfo {
        let mut info = PlatformInfo::detect();
        if let Some(name) = &self.platform.name {
            info.platform = PlatformIdentity::from_name(name);
        }
        if let Some(arch) = &self.platform.arch {
            info.arch = ArchitectureIdentity::from_name(arch);
        }
        info
    }
}

impl Validate for HarnessConfig {
    fn validate(&self) -> Result<()> {
        if let Some(root) = &self.artifact.root {
            validation::validate_path("artifact.root", &root.to_string_lossy())?;
        }
        validation::validate_file_name("artifact.name", self.artifact_name())?;
        validation::validate_symbol("artifact.entry_symbol", self.entry_symbol())?;

        if let Some(name) = &self.platform.name {
            validation::validate_non_empty_string("platform.name", name)?;
        }
        if let Some(arch) = &self.platform.arch {
            validation::validate_non_empty_string("platform.arch", arch)?;
        }
        Ok(())
    }
}
