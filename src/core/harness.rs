use crate::core::resolver::{resolve_artifact_path, DEFAULT_ARTIFACT_NAME, DEFAULT_ENTRY_SYMBOL};
use crate::domain::model::{ArtifactPath, PlatformInfo};
use crate::domain::ports::ModuleLoader;
use crate::utils::error::{BoxError, HarnessError, Result};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessSettings {
    pub root: PathBuf,
    pub artifact: String,
    pub entry_symbol: String,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            artifact: DEFAULT_ARTIFACT_NAME.to_string(),
            entry_symbol: DEFAULT_ENTRY_SYMBOL.to_string(),
        }
    }
}

/// Progress of a single `resolve_and_run` call. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Idle,
    PlatformChecked,
    NoOp,
    Resolved,
    Loaded,
    Invoked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The platform has no prebuilt artifact; nothing was touched.
    NoOp,
    /// The entry point ran exactly once.
    Invoked { artifact: ArtifactPath },
}

struct StageTracker {
    current: Stage,
}

impl StageTracker {
    fn new() -> Self {
        Self { current: Stage::Idle }
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(next > self.current, "stage moved backwards: {:?} -> {:?}", self.current, next);
        tracing::debug!("stage {:?} -> {:?}", self.current, next);
        self.current = next;
    }
}

pub struct Harness<L: ModuleLoader> {
    loader: L,
    settings: HarnessSettings,
}

impl<L: ModuleLoader> Harness<L> {
    pub fn new(loader: L) -> Self {
        Self::with_settings(loader, HarnessSettings::default())
    }

    pub fn with_settings(loader: L, settings: HarnessSettings) -> Self {
        Self { loader, settings }
    }

    pub fn settings(&self) -> &HarnessSettings {
        &self.settings
    }

    /// Resolution only; never touches the filesystem.
    pub fn resolve(&self, info: &PlatformInfo) -> Option<ArtifactPath> {
        resolve_artifact_path(&self.settings.root, &self.settings.artifact, info)
    }

    /// Resolves the artifact for `info`, loads it and calls its entry point once.
    ///
    /// Non-Windows platforms are a silent no-op. Every failure past that point is
    /// returned unchanged; there is no retry and no fallback path.
    pub fn resolve_and_run(&self, info: &PlatformInfo) -> Result<RunOutcome> {
        let mut stage = StageTracker::new();
        stage.advance(Stage::PlatformChecked);

        let Some(artifact) = self.resolve(info) else {
            stage.advance(Stage::NoOp);
            tracing::debug!("no prebuilt artifact for platform {}, skipping", info);
            return Ok(RunOutcome::NoOp);
        };
        stage.advance(Stage::Resolved);
        tracing::info!("resolved artifact for {}: {}", info, artifact);

        let module = self.loader.load(artifact.as_path())?;
        stage.advance(Stage::Loaded);

        let symbol = self.settings.entry_symbol.as_str();
        let entry = module.entry_point(symbol)?;

        tracing::info!("invoking `{}` from {}", symbol, artifact);
        let result = panic::catch_unwind(AssertUnwindSafe(|| entry.invoke()));
        stage.advance(Stage::Invoked);

        match result {
            Ok(Ok(())) => {
                tracing::info!("`{}` returned", symbol);
                Ok(RunOutcome::Invoked { artifact })
            }
            Ok(Err(source)) => Err(HarnessError::EntryPointExecution {
                symbol: symbol.to_string(),
                source,
            }),
            Err(payload) => Err(HarnessError::EntryPointExecution {
                symbol: symbol.to_string(),
                source: panic_message(payload),
            }),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> BoxError {
    match payload.downcast::<String>() {
        Ok(message) => (*message).into(),
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => (*message).into(),
            Err(_) => "entry point panicked".into(),
        },
    }
}
