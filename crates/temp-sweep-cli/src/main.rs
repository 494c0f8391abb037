mod commands;
mod logging;
mod progress;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{CleanArgs, Cli, Commands, ScanArgs};
use dotenv::dotenv;
use progress::CliReporter;
use temp_sweep_core::audit::{AuditLog, DeleteMode};
use temp_sweep_core::executor::{DeleteStatus, DeletionExecutor, SystemTrash};
use temp_sweep_core::ignore::IgnoreRules;
use temp_sweep_core::{AppConfig, ScanEngine, ScanResult, Thresholds};
use tracing::{error, info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match temp_sweep_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Scan(scan_args)) => {
            if let Err(err) = run_scan(&config, &scan_args) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::Clean(clean_args)) => {
            if let Err(err) = run_clean(&config, &clean_args) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::History { limit }) => {
            if let Err(err) = run_history(&config, limit) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

/// Root resolution order: flag, configured path, OS temp directory.
fn resolve_root(config: &AppConfig, args: &ScanArgs) -> PathBuf {
    args.root
        .clone()
        .or_else(|| config.root_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(std::env::temp_dir)
}

fn build_engine(config: &AppConfig, args: &ScanArgs) -> ScanEngine {
    let thresholds = Thresholds {
        min_unused_hours: args.min_unused_hours.or(config.min_unused_hours),
        min_age_days: args.min_age_days.or(config.min_age_days),
    };
    let ignore = IgnoreRules::load(Path::new(&config.ignore_list_path));
    ScanEngine::new(resolve_root(config, args), thresholds)
        .with_age_basis(config.age_basis)
        .with_ignore_rules(ignore)
}

fn run_scan(config: &AppConfig, args: &ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = build_engine(config, args);
    let result = engine.scan(&CliReporter::new())?;
    let log = AuditLog::new(&config.audit_log_path);

    print_candidates(&result);
    print_metrics(&result, &log)?;
    Ok(())
}

fn run_clean(config: &AppConfig, args: &CleanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = build_engine(config, &args.scan);
    let result = engine.scan(&CliReporter::new())?;
    print_candidates(&result);

    if result.candidates.is_empty() {
        return Ok(());
    }

    if args.dry_run {
        info!("Preview only, nothing deleted");
        return Ok(());
    }

    let log = AuditLog::new(&config.audit_log_path);
    let executor = DeletionExecutor::new(SystemTrash, log);

    if !args.paths.is_empty() {
        run_single_deletions(&executor, &result, &args.paths);
        return Ok(());
    }

    let stats = result.stats();
    let prompt = format!(
        "Move {} files ({:.2} MB) to the trash?",
        stats.candidate_count,
        stats.total_bytes as f64 / (1024.0 * 1024.0),
    );
    if !args.yes && !prompt_confirm(&prompt, Some(false))? {
        process::exit(0);
    }

    let report = executor.delete_all(&result.candidates);
    println!();
    info!(
        "Deleted {} files | Freed {} MB",
        format!("{}", report.deleted).green(),
        format!("{:.2}", report.mb_freed()).green(),
    );
    for outcome in report.failures() {
        if let DeleteStatus::Failed(err) = &outcome.status {
            warn!("{}: {}", outcome.path.display(), err);
        }
    }
    info!("Files are recoverable from the system trash");
    Ok(())
}

fn run_single_deletions(
    executor: &DeletionExecutor<SystemTrash>,
    result: &ScanResult,
    paths: &[PathBuf],
) {
    for path in paths {
        let file = match result.candidates.iter().find(|file| &file.path == path) {
            Some(file) => file,
            None => {
                warn!("{} is not in the candidate list, skipping", path.display());
                continue;
            }
        };

        let outcome = executor.delete_one(file, DeleteMode::Single);
        match &outcome.status {
            DeleteStatus::Deleted(record) => {
                info!(
                    "Deleted {} ({} MB, sent to the trash)",
                    path.display(),
                    record.size_mb,
                );
            }
            DeleteStatus::AlreadyGone => info!("{} already removed", path.display()),
            DeleteStatus::Failed(err) => warn!("{}: {}", path.display(), err),
        }
    }
}

fn run_history(config: &AppConfig, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let log = AuditLog::new(&config.audit_log_path);
    let records = log.read_all()?;

    if records.is_empty() {
        println!("No deletions yet.");
        return Ok(());
    }

    for record in records.iter().rev().take(limit) {
        println!(
            "{} | {} | {} hrs unused | {} days | {} MB | {}",
            record.deleted_at,
            record.path,
            record.last_used_hours,
            record.age_days,
            record.size_mb,
            record.mode,
        );
    }

    println!();
    info!(
        "{} MB freed across {} recorded deletions",
        format!("{:.2}", log.total_freed_mb()?).green(),
        records.len(),
    );
    info!("Files are recoverable from the system trash");
    Ok(())
}

fn print_candidates(result: &ScanResult) {
    if result.candidates.is_empty() {
        println!("No files match current filters.");
        return;
    }

    println!();
    for file in &result.candidates {
        println!(
            "{} | {} hrs unused | {} days old | {:.2} MB",
            file.path.display(),
            file.last_used_hours,
            file.age_days,
            file.size_mb(),
        );
    }
}

fn print_metrics(result: &ScanResult, log: &AuditLog) -> Result<(), Box<dyn std::error::Error>> {
    let stats = result.stats();
    let total_freed = log.total_freed_mb()?;

    println!();
    info!(
        "{} files found, {} MB to free, avg last used {} hrs ago",
        format!("{}", stats.candidate_count).cyan(),
        format!("{:.2}", stats.total_bytes as f64 / (1024.0 * 1024.0)).green(),
        format!("{:.1}", stats.avg_unused_hours).cyan(),
    );
    info!(
        "{} MB freed across all recorded deletions",
        format!("{:.2}", total_freed).green(),
    );
    if !result.skipped.is_empty() {
        warn!("{} files skipped (metadata unavailable)", result.skipped.len());
    }
    Ok(())
}

fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        io::stdin().read_line(&mut input)?;

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
