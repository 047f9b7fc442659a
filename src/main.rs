use std::env;
use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use snapshot_collector::cli::{Args, Commands};
use snapshot_collector::collectors::host::host_inspector;
use snapshot_collector::config::{default_catalog, load_catalog};
use snapshot_collector::constants::FALLBACK_ERROR_LOG;
use snapshot_collector::context::RunContext;
use snapshot_collector::diagnostics::{Diagnostics, RunLog};
use snapshot_collector::pipeline::execute;
use snapshot_collector::utils::compress::archive_destination;

fn main() -> ExitCode {
    // Parse arguments
    let args = match Args::try_parse_normalized() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    // Initialize logging
    if let Err(e) = initialize_logging(args.verbose) {
        eprintln!("{:#}", e);
    }

    // Handle subcommands
    if let Some(cmd) = &args.command {
        return match handle_subcommand(cmd) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{:#}", e);
                ExitCode::from(2)
            }
        };
    }

    let diagnostics = RunLog::new();
    match run(&args, &diagnostics) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics.error(&format!("Unexpected error: {:#}", e));
            diagnostics.debug(&format!("{:?}", e));
            write_fallback_log(&diagnostics);
            ExitCode::from(2)
        }
    }
}

/// Initialize logging with the specified verbosity level
fn initialize_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ).context("Failed to initialize logger")?;
    Ok(())
}

/// Handle the init-config subcommand
fn handle_subcommand(cmd: &Commands) -> Result<()> {
    match cmd {
        Commands::InitConfig { path } => {
            info!("Writing built-in task catalog to {}", path.display());
            default_catalog().save_to_file(path)?;
            info!("Configuration created successfully");
            Ok(())
        }
    }
}

/// Resolve inputs, prepare the destination and run the collection.
fn run(args: &Args, diagnostics: &RunLog) -> Result<()> {
    diagnostics.info(&format!("Starting snapshot collection (v{})", env!("CARGO_PKG_VERSION")));

    let cwd = env::current_dir().context("Failed to determine the working directory")?;
    let destination = args.destination_root(&cwd);
    diagnostics.debug(&format!("Destination root: {}", destination.display()));

    let catalog = load_catalog(&args.config_path(), diagnostics);

    fs::create_dir_all(&destination)
        .context(format!("Failed to create destination directory: {}", destination.display()))?;

    let context = RunContext::new(&destination, catalog, diagnostics)?
        .with_overrides(args.metadata_overrides())
        .with_checklist_template(args.checklist.clone())
        .with_registry_tool(args.reg_tool.clone());

    let inspector = host_inspector();
    execute(&context, inspector.as_ref())?;

    if args.archive {
        match archive_destination(&destination) {
            Ok(zip_path) => diagnostics.info(&format!("Archive created: {}", zip_path.display())),
            Err(e) => diagnostics.warn(&format!("Failed to archive {}: {:#}", destination.display(), e)),
        }
        diagnostics.flush_to(&context.log_file_path)?;
    }

    Ok(())
}

/// Best-effort copy of the run log into the working directory.
fn write_fallback_log(diagnostics: &RunLog) {
    let path = env::current_dir()
        .map(|cwd| cwd.join(FALLBACK_ERROR_LOG))
        .unwrap_or_else(|_| FALLBACK_ERROR_LOG.into());

    if let Err(e) = diagnostics.flush_to(&path) {
        eprintln!("Failed to write error log {}: {:#}", path.display(), e);
    }
}
