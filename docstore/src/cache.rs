use crate::collection::Document;
use crate::common::{Value, DEFAULT_EXTENSION, KEY_SEPARATOR, TEMP_FILE_PREFIX};
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A flat scratch cache of documents in a single directory.
///
/// Each entry is one compact JSON file named after its key. Keys cannot
/// contain `/`. Entries stay until deleted or cleared; there is no eviction.
///
/// ```rust,no_run
/// use docstore::{doc, DocumentCache};
///
/// let cache = DocumentCache::new(std::env::temp_dir().join("docstore-cache"));
/// cache.set("session", &doc! { user: "tony" })?;
/// assert!(cache.has("session"));
/// # Ok::<(), docstore::errors::DocStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocumentCache {
    root: PathBuf,
}

impl DocumentCache {
    /// Creates a cache stored in `root`. The directory is created on the
    /// first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        DocumentCache {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Caches `document` under `key`, replacing any previous entry.
    /// Returns `Ok(false)` when the entry could not be written.
    pub fn set(&self, key: &str, document: &Document) -> DocStoreResult<bool> {
        let path = self.entry_path(key)?;
        match self.write_entry(&path, document) {
            Ok(()) => Ok(true),
            Err(e) => {
                log::error!("Failed to cache document {}: {}", key, e);
                Ok(false)
            }
        }
    }

    fn write_entry(&self, path: &Path, document: &Document) -> DocStoreResult<()> {
        fs::create_dir_all(&self.root)?;
        let mut file = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .suffix(".tmp")
            .tempfile_in(&self.root)?;
        file.write_all(&document.to_bytes()?)?;
        file.flush()?;
        file.persist(path).map_err(|e| DocStoreError::from(e.error))?;
        Ok(())
    }

    /// Returns the cached document, or `None` when there is no entry.
    ///
    /// # Errors
    ///
    /// `CorruptData` when the entry cannot be decoded.
    pub fn get(&self, key: &str) -> DocStoreResult<Option<Document>> {
        let path = self.entry_path(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Document(document)) => Ok(Some(document)),
            Ok(_) | Err(_) => {
                log::error!("Cached document {} could not be decoded", key);
                Err(DocStoreError::new(
                    &format!("Cached document {} could not be decoded", key),
                    ErrorKind::CorruptData,
                ))
            }
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.entry_path(key)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    /// Removes an entry. Returns `false` when there was nothing to remove or
    /// the removal failed.
    pub fn delete(&self, key: &str) -> bool {
        let Ok(path) = self.entry_path(key) else {
            return false;
        };
        if !path.is_file() {
            return false;
        }

        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to delete cached document {}: {}", key, e);
                false
            }
        }
    }

    /// Removes every file in the cache directory. Subdirectories are left
    /// alone.
    pub fn clear(&self) -> DocStoreResult<()> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    fn entry_path(&self, key: &str) -> DocStoreResult<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(KEY_SEPARATOR) || key.contains('\\') {
            log::error!("Invalid cache key {:?}", key);
            return Err(DocStoreError::new(
                &format!("Invalid cache key {:?}", key),
                ErrorKind::InvalidKey,
            ));
        }
        Ok(self.root.join(format!("{}.{}", key, DEFAULT_EXTENSION)))
    }
}
