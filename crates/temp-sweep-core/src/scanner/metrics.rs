use crate::error::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Which timestamp file age is measured from.
///
/// Modification time is the default; creation time is not recorded by every
/// filesystem and falls back to modification time where missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeBasis {
    #[default]
    Modified,
    Created,
}

/// A regular file seen during one scan pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub last_used_hours: f64,
    pub age_days: f64,
    pub size_bytes: u64,
}

impl FileRecord {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

const SECS_PER_HOUR: f64 = 3600.0;
const SECS_PER_DAY: f64 = 86_400.0;

/// Compute age and usage metrics for one file.
///
/// `now` is captured once per scan pass so relative ordering among files in
/// the same pass is stable. Unreadable metadata yields
/// `Error::MetricsUnavailable`; callers treat that as "skip this file".
pub fn extract(path: &Path, now: SystemTime, age_basis: AgeBasis) -> Result<FileRecord, Error> {
    let metadata = fs::metadata(path).map_err(|source| Error::MetricsUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let accessed = metadata
        .accessed()
        .map_err(|source| Error::MetricsUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
    let modified = metadata
        .modified()
        .map_err(|source| Error::MetricsUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

    let age_reference = match age_basis {
        AgeBasis::Modified => modified,
        AgeBasis::Created => metadata.created().unwrap_or(modified),
    };

    Ok(FileRecord {
        path: path.to_path_buf(),
        last_used_hours: elapsed_secs(now, accessed) / SECS_PER_HOUR,
        age_days: elapsed_secs(now, age_reference) / SECS_PER_DAY,
        size_bytes: metadata.len(),
    })
}

/// Seconds from `earlier` to `now`, saturating at zero for timestamps in the
/// future.
fn elapsed_secs(now: SystemTime, earlier: SystemTime) -> f64 {
    now.duration_since(earlier)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or(0.0)
}
