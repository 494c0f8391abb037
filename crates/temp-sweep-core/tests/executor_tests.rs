use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use temp_sweep_core::audit::{AuditLog, DeleteMode};
use temp_sweep_core::executor::{DeleteError, DeleteStatus, DeletionExecutor, RecoverableDelete};
use temp_sweep_core::FileRecord;

/// Removes permanently. Stands in for the platform trash so the tests run
/// headless; the executor only sees the trait.
struct RemoveFile;

impl RecoverableDelete for RemoveFile {
    fn remove(&self, path: &Path) -> Result<(), DeleteError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(DeleteError::AlreadyGone)
            }
            Err(err) => Err(DeleteError::Other(err.to_string())),
        }
    }
}

/// Simulates a lock on one path, removes the rest.
struct LockedFile {
    locked: PathBuf,
}

impl RecoverableDelete for LockedFile {
    fn remove(&self, path: &Path) -> Result<(), DeleteError> {
        if path == self.locked {
            return Err(DeleteError::InUseOrProtected("simulated lock".to_string()));
        }
        RemoveFile.remove(path)
    }
}

fn make_record(path: &Path, size_bytes: u64) -> FileRecord {
    FileRecord {
        path: path.to_path_buf(),
        last_used_hours: 100.0,
        age_days: 10.0,
        size_bytes,
    }
}

fn write_file(path: &Path, size: usize) {
    fs::write(path, vec![0u8; size]).unwrap();
}

#[test]
fn test_batch_continues_past_failures() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.tmp");
    let b = dir.path().join("b.tmp");
    let c = dir.path().join("c.tmp");
    write_file(&a, 10);
    write_file(&b, 10);
    write_file(&c, 10);

    let log = AuditLog::new(dir.path().join("history.jsonl"));
    let executor = DeletionExecutor::new(LockedFile { locked: b.clone() }, log);

    let candidates = vec![
        make_record(&a, 10),
        make_record(&b, 10),
        make_record(&c, 10),
    ];
    let report = executor.delete_all(&candidates);

    assert_eq!(report.attempted, 3);
    assert_eq!(report.deleted, 2);
    assert_eq!(report.bytes_freed, 20);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, b);
    assert!(!failures[0].leaves_active_set());

    // The locked file survived, the rest did not.
    assert!(b.exists());
    assert!(!a.exists());
    assert!(!c.exists());

    // Exactly the two successes were recorded.
    assert_eq!(executor.audit_log().read_all().unwrap().len(), 2);
}

#[test]
fn test_already_gone_leaves_active_set_without_record() {
    let dir = tempdir().unwrap();
    let log = AuditLog::new(dir.path().join("history.jsonl"));
    let executor = DeletionExecutor::new(RemoveFile, log);

    let vanished = make_record(&dir.path().join("vanished.tmp"), 10);
    let outcome = executor.delete_one(&vanished, DeleteMode::Single);

    assert!(matches!(outcome.status, DeleteStatus::AlreadyGone));
    assert!(outcome.leaves_active_set());
    assert!(executor.audit_log().read_all().unwrap().is_empty());
}

#[test]
fn test_successful_delete_appends_audit_record() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("old.tmp");
    write_file(&target, 1_048_576);

    let log = AuditLog::new(dir.path().join("history.jsonl"));
    let executor = DeletionExecutor::new(RemoveFile, log);

    let outcome = executor.delete_one(&make_record(&target, 1_048_576), DeleteMode::Single);
    assert!(matches!(outcome.status, DeleteStatus::Deleted(_)));
    assert!(outcome.leaves_active_set());
    assert!(!target.exists());

    let records = executor.audit_log().read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path, target.to_string_lossy());
    assert_eq!(records[0].mode, DeleteMode::Single);
    assert_eq!(records[0].size_mb, 1.0);
    assert_eq!(records[0].age_days, 10.0);
    assert_eq!(records[0].last_used_hours, 100.0);
    assert!(chrono::DateTime::parse_from_rfc3339(&records[0].deleted_at).is_ok());
}

#[test]
fn test_bulk_deletions_record_bulk_mode() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.log");
    let b = dir.path().join("b.bak");
    write_file(&a, 10);
    write_file(&b, 10);

    let log = AuditLog::new(dir.path().join("history.jsonl"));
    let executor = DeletionExecutor::new(RemoveFile, log);

    let report = executor.delete_all(&[make_record(&a, 10), make_record(&b, 10)]);
    assert_eq!(report.deleted, 2);

    let records = executor.audit_log().read_all().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|record| record.mode == DeleteMode::Bulk));
}

#[test]
fn test_failed_delete_keeps_candidate_active() {
    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked.tmp");
    write_file(&locked, 10);

    let log = AuditLog::new(dir.path().join("history.jsonl"));
    let executor = DeletionExecutor::new(
        LockedFile {
            locked: locked.clone(),
        },
        log,
    );

    let outcome = executor.delete_one(&make_record(&locked, 10), DeleteMode::Single);
    assert!(matches!(
        outcome.status,
        DeleteStatus::Failed(DeleteError::InUseOrProtected(_))
    ));
    assert!(!outcome.leaves_active_set());
    assert!(locked.exists());
    assert!(executor.audit_log().read_all().unwrap().is_empty());
}

#[test]
fn test_batch_with_vanished_candidate_reports_no_failure() {
    let dir = tempdir().unwrap();
    let present = dir.path().join("present.tmp");
    write_file(&present, 10);
    let vanished = dir.path().join("vanished.tmp");

    let log = AuditLog::new(dir.path().join("history.jsonl"));
    let executor = DeletionExecutor::new(RemoveFile, log);

    let report = executor.delete_all(&[make_record(&present, 10), make_record(&vanished, 10)]);
    assert_eq!(report.deleted, 1);
    assert_eq!(report.bytes_freed, 10);
    assert_eq!(report.failures().count(), 0);

    // Both leave the active set: one deleted, one gone either way.
    assert!(report.outcomes.iter().all(|o| o.leaves_active_set()));
}
