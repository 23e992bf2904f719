use std::path::PathBuf;
use thiserror::Error;

/// Fault raised by an entry operation or by a loader backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Artifact not found: {}", .path.display())]
    ArtifactNotFound { path: PathBuf },

    #[error("Failed to load artifact {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("Artifact {} does not export entry point `{symbol}`", .path.display())]
    EntryPointMissing { path: PathBuf, symbol: String },

    #[error("Entry point `{symbol}` failed: {source}")]
    EntryPointExecution {
        symbol: String,
        #[source]
        source: BoxError,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Artifact,
    Module,
    EntryPoint,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl HarnessError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HarnessError::ArtifactNotFound { .. } => ErrorCategory::Artifact,
            HarnessError::Load { .. } => ErrorCategory::Module,
            HarnessError::EntryPointMissing { .. } | HarnessError::EntryPointExecution { .. } => {
                ErrorCategory::EntryPoint
            }
            HarnessError::ConfigError { .. } | HarnessError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            HarnessError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HarnessError::ConfigError { .. } | HarnessError::InvalidConfigValueError { .. } => {
                ErrorSeverity::Medium
            }
            HarnessError::ArtifactNotFound { .. }
            | HarnessError::EntryPointMissing { .. }
            | HarnessError::EntryPointExecution { .. } => ErrorSeverity::High,
            HarnessError::Load { .. } | HarnessError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            HarnessError::ArtifactNotFound { path } => format!(
                "Build the native addon first so that {} exists, or point --root at the package directory",
                path.display()
            ),
            HarnessError::Load { .. } => {
                "Check that the artifact matches the process architecture and is not corrupt"
                    .to_string()
            }
            HarnessError::EntryPointMissing { symbol, .. } => {
                format!("Export a parameterless `{}` function from the addon", symbol)
            }
            HarnessError::EntryPointExecution { .. } => {
                "Inspect the addon's own output; the failure happened inside the entry point"
                    .to_string()
            }
            HarnessError::IoError(_) => "Check file permissions and paths".to_string(),
            HarnessError::ConfigError { .. } | HarnessError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HarnessError::ArtifactNotFound { path } => {
                format!("No addon build found at {}", path.display())
            }
            HarnessError::Load { path, source } => {
                format!("Could not load addon {}: {}", path.display(), source)
            }
            HarnessError::EntryPointMissing { symbol, .. } => {
                format!("The addon has no `{}` entry point", symbol)
            }
            HarnessError::EntryPointExecution { symbol, source } => {
                format!("The addon's `{}` entry point failed: {}", symbol, source)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
