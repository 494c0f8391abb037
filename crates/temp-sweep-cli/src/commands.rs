use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "temp-sweep")]
#[command(about = "Finds stale temporary files and sweeps them to the trash", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List stale temporary files without deleting anything
    Scan(ScanArgs),
    /// Scan, then move matching files to the system trash
    Clean(CleanArgs),
    /// Show recently deleted files from the audit log
    History {
        /// Number of entries to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory to scan (defaults to the OS temp directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Only consider files at least this old, in days
    #[arg(long)]
    pub min_age_days: Option<f64>,

    /// Only consider files unused for at least this many hours
    #[arg(long)]
    pub min_unused_hours: Option<f64>,
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Delete only these candidates instead of the whole list
    pub paths: Vec<PathBuf>,

    /// Preview only: list what would be deleted, touch nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}
