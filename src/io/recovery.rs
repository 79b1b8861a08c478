use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use super::store::{KeyValueStore, StoreError};

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Corrupt value backups
// ---------------------------------------------------------------------------

/// Key under which a corrupt value of `key` is kept, e.g.
/// `tasks.corrupt-20250514T093000Z`
pub fn backup_key(key: &str, at: DateTime<Utc>) -> String {
    format!("{}.corrupt-{}", key, at.format("%Y%m%dT%H%M%SZ"))
}

/// Copy an undecodable value aside, byte for byte, before it gets
/// overwritten. Returns the backup key.
pub fn backup_corrupt_value<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
) -> Result<String, StoreError> {
    let backup = backup_key(key, Utc::now());
    store.copy(key, &backup)?;
    Ok(backup)
}
