//! A minimal keyed blob store for persisting application state.
//!
//! The transaction store serializes its whole collection to a JSON string and
//! writes it through under a fixed key on every mutation. Keeping the
//! load/save interface this narrow means the backing mechanism (a file on
//! disk, an in-memory map) can be swapped without touching the store or the
//! aggregation logic.

use std::{
    collections::HashMap,
    fs, io,
    path::PathBuf,
    sync::Mutex,
};

/// A keyed store of string blobs.
///
/// Implementations are best-effort: a failed [BlobStore::load] is reported as
/// an absent blob, and callers are expected to treat a failed
/// [BlobStore::save] as non-fatal.
pub trait BlobStore: Send {
    /// Get the blob stored under `key`, or `None` if there is no readable
    /// blob for that key.
    fn load(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous blob.
    fn save(&self, key: &str, value: &str) -> io::Result<()>;
}

/// A [BlobStore] that keeps each key in its own file under a data directory.
///
/// The directory is created on the first save if it does not exist.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Create a blob store that reads and writes files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)
    }
}

/// A [BlobStore] that keeps blobs in memory.
///
/// State is lost when the process exits. Used for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    /// Create an empty in-memory blob store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> Option<String> {
        self.blobs.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| io::Error::other("blob store lock was poisoned"))?;
        blobs.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}
