pub mod toml_config;

pub use toml_config::HarnessConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::logger::LogFormat;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "addon-harness")]
#[command(about = "Load a prebuilt native addon and call its entry point")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Package directory containing build/
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Artifact file name
    #[arg(long, global = true)]
    pub artifact: Option<String>,

    /// Entry point symbol
    #[arg(long, global = true)]
    pub entry: Option<String>,

    /// Platform to resolve for instead of the running one (e.g. win32, linux)
    #[arg(long, global = true)]
    pub platform: Option<String>,

    /// Architecture to resolve for instead of the running one (e.g. x64, ia32)
    #[arg(long, global = true)]
    pub arch: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Resolve, load and invoke the addon (default)
    Run,
    /// Print the artifact path that would be loaded, without loading it
    Resolve {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }

    /// Config file (if any) with command line flags layered on top.
    pub fn load_config(&self) -> Result<HarnessConfig> {
        let mut config = match &self.config {
            Some(path) => HarnessConfig::from_file(path)?,
            None => HarnessConfig::default(),
        };

        if let Some(root) = &self.root {
            config.artifact.root = Some(root.clone());
        }
        if let Some(artifact) = &self.artifact {
            config.artifact.name = Some(artifact.clone());
        }
        if let Some(entry) = &self.entry {
            config.artifact.entry_symbol = Some(entry.clone());
        }
        if let Some(platform) = &self.platform {
            config.platform.name = Some(platform.clone());
        }
        if let Some(arch) = &self.arch {
            config.platform.arch = Some(arch.clone());
        }

        Ok(config)
    }
}
