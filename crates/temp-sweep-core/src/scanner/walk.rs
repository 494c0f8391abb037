use crate::error::Error;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Lazily yields every regular file under `root`, recursively.
///
/// Entries that cannot be read (permission denied, vanished mid-walk) are
/// skipped without aborting the walk. Symlinks are not followed, which also
/// rules out link cycles. No ordering guarantee across siblings.
pub fn walk_files(root: &Path) -> Result<impl Iterator<Item = PathBuf>, Error> {
    if !root.is_dir() {
        return Err(Error::DirectoryNotFound(root.to_path_buf()));
    }

    let files = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path());

    Ok(files)
}
