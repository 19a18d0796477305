//! Durable storage for the leaderboard.
//!
//! The whole list is written as one JSON document and read back wholesale.
//! [`FileStore`] writes a sibling temp file and renames it over the target, so
//! a crash mid-write leaves either the old or the new leaderboard on disk.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use crate::record::ScoreRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("score file {path} is not a valid leaderboard: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode leaderboard: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Where the leaderboard lives between runs.
pub trait ScoreStore: Send {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<ScoreRecord>>, StoreError>;

    fn save(&self, records: &[ScoreRecord]) -> Result<(), StoreError>;
}

/// JSON file on the local filesystem, private to the current user.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> Result<Option<Vec<ScoreRecord>>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, records: &[ScoreRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.temp_path();
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let written = options.open(&tmp).and_then(|mut file| {
            file.write_all(&json)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|_| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_error(e));
        }

        Ok(())
    }
}

/// In-process store. Clones share the same slot, so dropping a manager and
/// opening a new one over a clone behaves like a process restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<Vec<ScoreRecord>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents as last saved, `None` if never saved.
    pub fn snapshot(&self) -> Option<Vec<ScoreRecord>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<ScoreRecord>>, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, records: &[ScoreRecord]) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(records.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("scores.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("scores.json"));
        let records = vec![
            ScoreRecord::new("A", 300, 1),
            ScoreRecord::new("B", 200, 2),
            ScoreRecord::new("C", 200, 3),
        ];

        store.save(&records).unwrap();
        assert_eq!(store.load().unwrap(), Some(records));
        assert!(!store.temp_path().exists(), "temp file must be renamed away");
    }

    #[test]
    fn test_corrupt_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, b"{ not json").unwrap();

        let err = FileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }), "{err}");
    }

    #[test]
    fn test_unwritable_location_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file, not a directory").unwrap();

        let store = FileStore::new(blocker.join("scores.json"));
        let err = store.save(&[]).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("scores.json"));
        store.save(&[ScoreRecord::new("A", 1, 0)]).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_memory_store_clones_share_contents() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let other = store.clone();
        other.save(&[ScoreRecord::new("A", 5, 0)]).unwrap();
        assert_eq!(store.load().unwrap().unwrap().len(), 1);
    }
}
