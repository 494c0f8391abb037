use crate::error::Error;
use crate::filter::{self, Thresholds};
use crate::ignore::IgnoreRules;
use crate::progress::ProgressReporter;
use crate::scanner::metrics::{self, AgeBasis, FileRecord};
use crate::scanner::walk;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, info};

/// One-shot scan pipeline over a single root directory.
pub struct ScanEngine {
    root: PathBuf,
    thresholds: Thresholds,
    age_basis: AgeBasis,
    ignore: IgnoreRules,
}

/// A file the walk saw but could not measure. Skips are ordinary per-item
/// results, never failures of the whole scan.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug)]
pub struct ScanResult {
    /// Deletion candidates, oldest first (path order breaks ties).
    pub candidates: Vec<FileRecord>,
    pub skipped: Vec<SkippedFile>,
    pub files_walked: usize,
    pub scan_duration: Duration,
    pub filter_duration: Duration,
}

#[derive(Debug)]
pub struct ScanStats {
    pub candidate_count: usize,
    pub total_bytes: u64,
    pub avg_unused_hours: f64,
}

impl ScanResult {
    /// Aggregates for the presentation metrics row.
    pub fn stats(&self) -> ScanStats {
        let total_bytes = self.candidates.iter().map(|file| file.size_bytes).sum();
        let avg_unused_hours = if self.candidates.is_empty() {
            0.0
        } else {
            self.candidates
                .iter()
                .map(|file| file.last_used_hours)
                .sum::<f64>()
                / self.candidates.len() as f64
        };
        ScanStats {
            candidate_count: self.candidates.len(),
            total_bytes,
            avg_unused_hours,
        }
    }
}

impl ScanEngine {
    pub fn new(root: impl Into<PathBuf>, thresholds: Thresholds) -> Self {
        Self {
            root: root.into(),
            thresholds,
            age_basis: AgeBasis::default(),
            ignore: IgnoreRules::default(),
        }
    }

    pub fn with_ignore_rules(mut self, ignore: IgnoreRules) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn with_age_basis(mut self, age_basis: AgeBasis) -> Self {
        self.age_basis = age_basis;
        self
    }

    /// Run the full stale-file detection pipeline:
    /// 1. Recursive walk of the root (per-entry errors skipped)
    /// 2. Per-file age/usage metrics against one captured "now"
    /// 3. Ignore + extension + threshold filtering
    /// 4. Sort candidates oldest-first
    pub fn scan(&self, reporter: &dyn ProgressReporter) -> Result<ScanResult, Error> {
        info!("Scanning {}", self.root.display());
        reporter.on_scan_start();

        let scan_start = Instant::now();
        let now = SystemTime::now();
        let mut records = Vec::new();
        let mut skipped = Vec::new();
        let mut files_walked = 0usize;

        for path in walk::walk_files(&self.root)? {
            files_walked += 1;
            reporter.on_scan_progress(files_walked, &path.to_string_lossy());

            match metrics::extract(&path, now, self.age_basis) {
                Ok(record) => records.push(record),
                Err(err) => {
                    debug!("skipping {}: {}", path.display(), err);
                    skipped.push(SkippedFile {
                        path,
                        reason: err.to_string(),
                    });
                }
            }
        }
        let scan_duration = scan_start.elapsed();
        reporter.on_scan_complete(files_walked, scan_duration.as_secs_f64());
        debug!(
            "Scan completed in {:.2}s — {} files, {} skipped",
            scan_duration.as_secs_f64(),
            files_walked,
            skipped.len(),
        );

        let filter_start = Instant::now();
        let mut candidates = filter::filter_candidates(records, &self.thresholds, &self.ignore);
        candidates.sort_by(|a, b| {
            b.age_days
                .total_cmp(&a.age_days)
                .then_with(|| a.path.cmp(&b.path))
        });
        let filter_duration = filter_start.elapsed();
        reporter.on_filter_complete(candidates.len(), filter_duration.as_secs_f64());
        info!("{} deletion candidates", candidates.len());

        Ok(ScanResult {
            candidates,
            skipped,
            files_walked,
            scan_duration,
            filter_duration,
        })
    }
}
