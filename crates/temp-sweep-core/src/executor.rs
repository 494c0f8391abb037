use crate::audit::{AuditLog, DeleteMode, DeletionRecord};
use crate::filter::round2;
use crate::scanner::metrics::FileRecord;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Why a single deletion did not complete.
#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("file is in use or protected: {0}")]
    InUseOrProtected(String),

    #[error("file already removed")]
    AlreadyGone,

    #[error("{0}")]
    Other(String),
}

/// Abstract recoverable-removal capability.
///
/// The core never erases permanently; the platform layer supplies the actual
/// holding area. Tests inject doubles through this seam.
pub trait RecoverableDelete {
    fn remove(&self, path: &Path) -> Result<(), DeleteError>;
}

/// Moves files to the operating system trash / recycle bin.
pub struct SystemTrash;

impl RecoverableDelete for SystemTrash {
    fn remove(&self, path: &Path) -> Result<(), DeleteError> {
        match fs::symlink_metadata(path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(DeleteError::AlreadyGone);
            }
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                return Err(DeleteError::InUseOrProtected(err.to_string()));
            }
            Err(err) => return Err(DeleteError::Other(err.to_string())),
            Ok(_) => {}
        }

        trash::delete(path).map_err(|err| {
            let detail = err.to_string();
            match err {
                trash::Error::CouldNotAccess { .. } => DeleteError::InUseOrProtected(detail),
                _ => DeleteError::Other(detail),
            }
        })
    }
}

#[derive(Debug)]
pub enum DeleteStatus {
    /// Moved to the holding area and recorded in the audit log.
    Deleted(DeletionRecord),
    /// Vanished between scan and deletion. Nothing was freed and nothing is
    /// logged, but the candidate leaves the active set either way.
    AlreadyGone,
    /// Deletion failed; the candidate stays in the active set.
    Failed(DeleteError),
}

/// One candidate's deletion outcome.
#[derive(Debug)]
pub struct DeleteOutcome {
    pub path: PathBuf,
    pub status: DeleteStatus,
}

impl DeleteOutcome {
    /// Whether the candidate should leave the in-memory active set.
    pub fn leaves_active_set(&self) -> bool {
        matches!(
            self.status,
            DeleteStatus::Deleted(_) | DeleteStatus::AlreadyGone
        )
    }
}

/// Aggregate result of a batch deletion.
#[derive(Debug)]
pub struct BatchReport {
    pub attempted: usize,
    pub deleted: usize,
    pub bytes_freed: u64,
    pub outcomes: Vec<DeleteOutcome>,
}

impl BatchReport {
    pub fn failures(&self) -> impl Iterator<Item = &DeleteOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.status, DeleteStatus::Failed(_)))
    }

    pub fn mb_freed(&self) -> f64 {
        self.bytes_freed as f64 / (1024.0 * 1024.0)
    }
}

/// Removes candidates recoverably and records every success in the audit log.
pub struct DeletionExecutor<T: RecoverableDelete> {
    remover: T,
    log: AuditLog,
}

impl<T: RecoverableDelete> DeletionExecutor<T> {
    pub fn new(remover: T, log: AuditLog) -> Self {
        Self { remover, log }
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.log
    }

    /// Delete one candidate. Every failure is classified and returned in the
    /// outcome; nothing here aborts a caller's batch.
    pub fn delete_one(&self, file: &FileRecord, mode: DeleteMode) -> DeleteOutcome {
        let path = file.path.clone();
        match self.remover.remove(&path) {
            Ok(()) => {
                let record = DeletionRecord {
                    path: path.to_string_lossy().into_owned(),
                    deleted_at: chrono::Utc::now().to_rfc3339(),
                    age_days: round2(file.age_days),
                    last_used_hours: round2(file.last_used_hours),
                    size_mb: round2(file.size_mb()),
                    mode,
                };
                if let Err(err) = self.log.append(&record) {
                    // The file is already in the trash; the failed append
                    // only leaves a gap in the trail.
                    warn!("deleted {} but could not record it: {}", path.display(), err);
                }
                debug!("trashed: {}", path.display());
                DeleteOutcome {
                    path,
                    status: DeleteStatus::Deleted(record),
                }
            }
            Err(DeleteError::AlreadyGone) => {
                info!(
                    "'{}' no longer exists, dropping from candidates",
                    path.display()
                );
                DeleteOutcome {
                    path,
                    status: DeleteStatus::AlreadyGone,
                }
            }
            Err(err) => {
                error!("Failed to remove '{}': {}", path.display(), err);
                DeleteOutcome {
                    path,
                    status: DeleteStatus::Failed(err),
                }
            }
        }
    }

    /// Delete every candidate in order, continuing past individual failures.
    pub fn delete_all(&self, files: &[FileRecord]) -> BatchReport {
        let mut outcomes = Vec::with_capacity(files.len());
        let mut deleted = 0usize;
        let mut bytes_freed = 0u64;

        for file in files {
            let outcome = self.delete_one(file, DeleteMode::Bulk);
            if let DeleteStatus::Deleted(_) = outcome.status {
                deleted += 1;
                bytes_freed += file.size_bytes;
            }
            outcomes.push(outcome);
        }

        let failed = outcomes
            .iter()
            .filter(|outcome| matches!(outcome.status, DeleteStatus::Failed(_)))
            .count();
        info!(
            "Batch deletion: {} of {} removed, {} failed",
            deleted,
            files.len(),
            failed,
        );

        BatchReport {
            attempted: files.len(),
            deleted,
            bytes_freed,
            outcomes,
        }
    }
}
