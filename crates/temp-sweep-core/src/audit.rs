use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// How a deletion was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    Single,
    #[default]
    Bulk,
}

impl fmt::Display for DeleteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteMode::Single => write!(f, "single"),
            DeleteMode::Bulk => write!(f, "bulk"),
        }
    }
}

/// One deletion, recorded at the moment it succeeded.
///
/// Records are append-only: never mutated or removed by this system. Every
/// field defaults on read so entries written by older versions degrade to
/// placeholders instead of failing the whole log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionRecord {
    #[serde(default = "unknown")]
    pub path: String,
    #[serde(default = "unknown")]
    pub deleted_at: String,
    #[serde(default)]
    pub age_days: f64,
    #[serde(default)]
    pub last_used_hours: f64,
    #[serde(default)]
    pub size_mb: f64,
    #[serde(default)]
    pub mode: DeleteMode,
}

fn unknown() -> String {
    "unknown".to_string()
}

/// Append-only JSON Lines store of deletion history.
///
/// One record per line: a crash mid-write can only truncate the final line,
/// never the records already on disk.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durably append one record, creating the log file (and its parent
    /// directories) on first use.
    pub fn append(&self, record: &DeletionRecord) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// All records in insertion order. A missing log is an empty log;
    /// a malformed line is skipped, not fatal.
    pub fn read_all(&self) -> Result<Vec<DeletionRecord>, Error> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        Ok(contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str(line) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("skipping malformed audit log line: {}", err);
                    None
                }
            })
            .collect())
    }

    /// Total megabytes freed across the whole history.
    pub fn total_freed_mb(&self) -> Result<f64, Error> {
        Ok(self.read_all()?.iter().map(|record| record.size_mb).sum())
    }
}
