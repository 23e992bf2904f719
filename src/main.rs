use addon_harness::config::Command;
use addon_harness::utils::error::ErrorSeverity;
use addon_harness::utils::{logger, validation::Validate};
use addon_harness::{CliConfig, DynamicLibraryLoader, Harness, HarnessError, PlatformInfo, RunOutcome};
use anyhow::Context;
use clap::Parser;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ResolveReport {
    platform: PlatformInfo,
    artifact: Option<String>,
    exists: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.log_format, cli.verbose);

    tracing::info!("Starting addon-harness");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.load_config().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    let info = config.platform_info();
    let harness = Harness::with_settings(DynamicLibraryLoader::new(), config.settings());

    match cli.command() {
        Command::Resolve { json } => {
            let artifact = harness.resolve(&info);
            let report = ResolveReport {
                platform: info,
                exists: artifact.as_ref().is_some_and(|a| a.as_path().is_file()),
                artifact: artifact.map(|a| a.to_string()),
            };

            if json {
                let out = serde_json::to_string_pretty(&report)
                    .context("failed to serialize resolution report")?;
                println!("{}", out);
            } else {
                match &report.artifact {
                    Some(path) if report.exists => println!("{}", path),
                    Some(path) => println!("{} (missing)", path),
                    None => println!("no artifact for platform {}", info),
                }
            }
        }
        Command::Run => match harness.resolve_and_run(&info) {
            Ok(RunOutcome::NoOp) => {
                tracing::info!("Platform {} has no prebuilt addon, nothing to run", info);
            }
            Ok(RunOutcome::Invoked { artifact }) => {
                tracing::info!("✅ Addon entry point completed: {}", artifact);
            }
            Err(e) => {
                tracing::error!(
                    "❌ Addon run failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());

                std::process::exit(exit_code(&e));
            }
        },
    }

    Ok(())
}

fn exit_code(e: &HarnessError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
