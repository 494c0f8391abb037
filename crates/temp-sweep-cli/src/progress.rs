use colored::*;
use temp_sweep_core::ProgressReporter;

/// Terminal progress reporter: phase-completion lines on stderr.
pub struct CliReporter;

impl CliReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_complete(&self, total_files: usize, duration_secs: f64) {
        eprintln!(
            "  {} Scan complete: {} files in {:.2}s",
            "✓".green(),
            total_files,
            duration_secs,
        );
    }

    fn on_filter_complete(&self, candidates: usize, duration_secs: f64) {
        eprintln!(
            "  {} Filter complete: {} candidates in {:.2}s",
            "✓".green(),
            candidates,
            duration_secs,
        );
    }
}
