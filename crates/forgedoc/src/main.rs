//! forgedoc
//!
//! Post-processes `forge doc` Markdown output in place so it renders on
//! Docusaurus. Run it after `forge doc --out docs/docs/contracts` and before
//! publishing the site.

use anyhow::Result;
use clap::Parser;
use forgedoc::cli::{Cli, Commands};
use forgedoc::config::ForgedocConfig;
use forgedoc::errors::{ActionableError, ConfigError, DocumentError};
use forgedoc::output::{ExitCode, JsonOutput, OutputContext};
use forgedoc::processor::{FileProcessor, ProcessOptions, PrunePolicy};
use forgedoc::walker::{process_tree, prune_tree, RunReport};
use std::env;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Determine the exit code from the error chain
fn error_to_exit_code(error: &anyhow::Error) -> ExitCode {
    for cause in error.chain() {
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            return match io_error.kind() {
                std::io::ErrorKind::NotFound => ExitCode::NotFound,
                std::io::ErrorKind::PermissionDenied => ExitCode::PermissionDenied,
                _ => ExitCode::ExternalError,
            };
        }
        if cause.is::<ConfigError>()
            || cause.is::<DocumentError>()
            || cause.is::<toml::de::Error>()
        {
            return ExitCode::InvalidArgument;
        }
    }

    let error_msg = error.to_string().to_lowercase();
    if error_msg.contains("not found") {
        ExitCode::NotFound
    } else if error_msg.contains("invalid") {
        ExitCode::InvalidArgument
    } else {
        ExitCode::GenericError
    }
}

fn main() {
    let exit_code = match run() {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            match e.downcast_ref::<ActionableError>() {
                Some(actionable) => eprint!("{}", actionable),
                None => eprintln!("Error: {:#}", e),
            }
            error_to_exit_code(&e)
        }
    };

    if exit_code != ExitCode::Success {
        debug!(code = exit_code.code(), "{}", exit_code.description());
        std::process::exit(exit_code.code());
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("FORGEDOC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = OutputContext::new(cli.quiet, cli.json);
    let current_dir = env::current_dir()?;

    let config = match &cli.config {
        Some(path) => ForgedocConfig::load(path)?,
        None => ForgedocConfig::load_default(&current_dir)?,
    };

    let command = cli.command.unwrap_or_default();
    let docs_dir = current_dir.join(
        command
            .target()
            .docs_dir
            .clone()
            .unwrap_or_else(|| config.docs_dir()),
    );
    debug!(docs_dir = %docs_dir.display(), command = command.name(), "Starting");

    let report = match &command {
        Commands::Run {
            dry_run,
            keep_index,
            ..
        } => {
            let processor = FileProcessor::from_config(&docs_dir, &config)?;
            process_tree(
                &processor,
                ProcessOptions {
                    dry_run: *dry_run,
                    prune: !keep_index,
                },
            )?
        }
        Commands::Rewrite { dry_run, .. } => {
            let processor = FileProcessor::from_config(&docs_dir, &config)?;
            process_tree(
                &processor,
                ProcessOptions {
                    dry_run: *dry_run,
                    prune: false,
                },
            )?
        }
        Commands::Prune { dry_run, .. } => {
            let policy = PrunePolicy::new(config.prune().file_names()?);
            prune_tree(&docs_dir, &policy, *dry_run)?
        }
    };

    print_report(&output, command.name(), &report)
}

fn print_report(output: &OutputContext, command: &str, report: &RunReport) -> Result<()> {
    if output.is_json() {
        let json = JsonOutput::success(report, command);
        println!("{}", json.to_json_string()?);
        return Ok(());
    }

    let (modified, deleted) = if report.dry_run {
        ("Would modify", "Would delete")
    } else {
        ("Modified", "Deleted")
    };

    for file in &report.files {
        let shown = file
            .path
            .strip_prefix(&report.docs_dir)
            .unwrap_or(&file.path);
        if file.changed {
            output.print_info(format!("{}: {}", modified, shown.display()))?;
        }
        if file.deleted {
            output.print_info(format!("{}: {}", deleted, shown.display()))?;
        }
    }

    let totals = &report.totals;
    output.print_data(format!(
        "Processed {} files: {} modified, {} deleted ({} source links, {} inherits paths){}",
        totals.processed,
        totals.changed,
        totals.deleted,
        totals.source_links,
        totals.inherits_paths,
        if report.dry_run { " [dry run]" } else { "" }
    ))?;

    Ok(())
}
