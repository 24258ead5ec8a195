use crate::collection::Document;
use crate::common::{key_segments, normalize_prefix, Value, KEY_SEPARATOR, TEMP_FILE_PREFIX};
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use crate::filter::ConditionSet;
use crate::store::{FindMode, FindOptions, FindResult, StoreBuilder, StoreConfig};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A directory of JSON documents, one file per key.
///
/// A key such as `books/computing/0321127420` is stored at
/// `<root>/books/computing/0321127420.json`. Writes go to a temporary file
/// first and are renamed into place, so readers never see a partially
/// written document.
///
/// There is no locking. Two writers to the same key race and the last rename
/// wins, and a scan running next to writers may see or miss documents
/// written while it runs.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    config: StoreConfig,
}

impl DocumentStore {
    /// Opens a store rooted at `root` with default settings, creating the
    /// directory if needed.
    pub fn open(root: impl AsRef<Path>) -> DocStoreResult<DocumentStore> {
        StoreBuilder::new(root).open()
    }

    pub fn builder(root: impl AsRef<Path>) -> StoreBuilder {
        StoreBuilder::new(root)
    }

    pub(crate) fn with_config(mut config: StoreConfig) -> DocStoreResult<DocumentStore> {
        fs::create_dir_all(&config.root).map_err(|e| {
            log::error!("Failed to create store root {:?}: {}", config.root, e);
            DocStoreError::new_with_cause(
                &format!("Failed to create store root {:?}", config.root),
                ErrorKind::IOError,
                e.into(),
            )
        })?;
        config.root = fs::canonicalize(&config.root)?;

        if let Some(scratch_dir) = &config.scratch_dir {
            fs::create_dir_all(scratch_dir)?;
        }

        // the root must accept new files
        tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .tempfile_in(&config.root)
            .map_err(|e| {
                log::error!("Store root {:?} is not writable: {}", config.root, e);
                DocStoreError::new_with_cause(
                    &format!("Store root {:?} is not writable", config.root),
                    ErrorKind::PermissionDenied,
                    e.into(),
                )
            })?;

        log::info!("Opened document store at {:?}", config.root);
        Ok(DocumentStore { config })
    }

    /// The absolute root directory.
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Reads the document stored under `key`.
    ///
    /// # Errors
    ///
    /// * `InvalidKey` if the key is malformed
    /// * `NotFound` if nothing is stored under the key
    /// * `CorruptData` if the file is not a JSON object
    pub fn get(&self, key: &str) -> DocStoreResult<Document> {
        let path = self.document_path(key)?;
        let bytes = fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                log::error!("Document {} not found", key);
                DocStoreError::new(&format!("Document {} not found", key), ErrorKind::NotFound)
            } else {
                log::error!("Failed to read document {}: {}", key, e);
                DocStoreError::new_with_cause(
                    &format!("Failed to read document {}", key),
                    ErrorKind::IOError,
                    e.into(),
                )
            }
        })?;

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            log::error!("Document {} could not be decoded: {}", key, e);
            DocStoreError::new(
                &format!("Document {} could not be decoded: {}", key, e),
                ErrorKind::CorruptData,
            )
        })?;

        match value {
            Value::Document(document) => Ok(document.with_key(key)),
            other => {
                log::error!("Document {} does not hold an object: {}", key, other);
                Err(DocStoreError::new(
                    &format!("Document {} does not hold an object", key),
                    ErrorKind::CorruptData,
                ))
            }
        }
    }

    /// Writes `document` under `key`, replacing any previous version.
    ///
    /// Returns `Ok(false)` when the file could not be written or renamed into
    /// place; the previous version, if any, is left untouched. Only a
    /// malformed key is an error.
    pub fn set(&self, key: &str, document: &Document) -> DocStoreResult<bool> {
        let path = self.document_path(key)?;
        match self.write_atomic(&path, document) {
            Ok(()) => Ok(true),
            Err(e) => {
                log::error!("Failed to write document {}: {}", key, e);
                Ok(false)
            }
        }
    }

    fn write_atomic(&self, path: &Path, document: &Document) -> DocStoreResult<()> {
        let parent = path.parent().unwrap_or(self.config.root.as_path());
        fs::create_dir_all(parent)?;

        let scratch = self.config.scratch_dir.as_deref().unwrap_or(parent);
        let mut file = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .suffix(".tmp")
            .tempfile_in(scratch)?;

        let mut buffer = Vec::new();
        document.write_json(&mut buffer, self.config.pretty)?;
        file.write_all(&buffer)?;
        file.flush()?;
        file.as_file().sync_all()?;

        file.persist(path).map_err(|e| DocStoreError::from(e.error))?;
        Ok(())
    }

    /// Checks whether a document file exists under `key`. The file is not
    /// read, and a malformed key simply reports `false`.
    pub fn has(&self, key: &str) -> bool {
        self.document_path(key)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    /// Removes the document stored under `key`.
    ///
    /// Fails with `NotFound` when there is nothing to remove, and returns
    /// `Ok(false)` when the file exists but could not be removed.
    pub fn delete(&self, key: &str) -> DocStoreResult<bool> {
        let path = self.document_path(key)?;
        if !path.is_file() {
            log::error!("Document {} not found", key);
            return Err(DocStoreError::new(
                &format!("Document {} not found", key),
                ErrorKind::NotFound,
            ));
        }

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) => {
                log::error!("Failed to delete document {}: {}", key, e);
                Ok(false)
            }
        }
    }

    /// Lists the keys stored under `prefix`.
    ///
    /// The walk is depth first and entries of each directory are visited in
    /// file name order, so the result is stable between calls. Without
    /// `recursive`, only documents directly inside `prefix` are listed. A
    /// prefix that does not exist yields an empty list.
    pub fn list(&self, prefix: &str, recursive: bool) -> DocStoreResult<Vec<String>> {
        let prefix = normalize_prefix(prefix);
        let dir = if prefix.is_empty() {
            self.config.root.clone()
        } else {
            key_segments(prefix)?
                .iter()
                .fold(self.config.root.clone(), |dir, segment| dir.join(segment))
        };

        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut keys = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() || !self.is_document_file(entry.path()) {
                continue;
            }

            match self.key_of(entry.path()) {
                Some(key) => keys.push(key),
                None => log::warn!("Skipping file with unusable name {:?}", entry.path()),
            }
        }
        Ok(keys)
    }

    /// Finds documents under the prefix of `options` that match its
    /// conditions, shaped by `mode`.
    ///
    /// Every candidate is read and decoded. A candidate deleted while the
    /// scan runs is skipped; a corrupt candidate fails the whole find.
    pub fn find(&self, mode: FindMode, options: &FindOptions) -> DocStoreResult<FindResult> {
        options.validate()?;

        let result = match mode {
            FindMode::First => {
                let mut first = None;
                self.scan(options, Some(1), |_, document| first = Some(document))?;
                FindResult::First(first)
            }
            FindMode::All => {
                let mut documents = Vec::new();
                self.scan(options, options.limit, |_, document| documents.push(document))?;
                FindResult::All(documents)
            }
            FindMode::List => {
                let mut keys = Vec::new();
                self.scan(options, options.limit, |key, _| keys.push(key))?;
                FindResult::List(keys)
            }
            FindMode::Count => {
                let mut count = 0;
                self.scan(options, options.limit, |_, _| count += 1)?;
                FindResult::Count(count)
            }
        };
        Ok(result)
    }

    /// Same as [DocumentStore::find] with the mode given by name: `first`,
    /// `all`, `list` or `count`. Other names fail with `UnsupportedOperation`.
    pub fn find_by_name(&self, mode: &str, options: &FindOptions) -> DocStoreResult<FindResult> {
        self.find(mode.parse()?, options)
    }

    pub fn find_first(&self, options: &FindOptions) -> DocStoreResult<Option<Document>> {
        self.find(FindMode::First, options).map(FindResult::into_first)
    }

    pub fn find_all(&self, options: &FindOptions) -> DocStoreResult<Vec<Document>> {
        self.find(FindMode::All, options).map(FindResult::into_documents)
    }

    pub fn find_list(&self, options: &FindOptions) -> DocStoreResult<Vec<String>> {
        self.find(FindMode::List, options).map(FindResult::into_keys)
    }

    pub fn count(&self, options: &FindOptions) -> DocStoreResult<usize> {
        self.find(FindMode::Count, options).map(|result| result.count())
    }

    /// Returns the keys of the documents under `prefix` matching
    /// `conditions`, after skipping `offset` matches and up to `limit` keys.
    pub fn search(
        &self,
        prefix: &str,
        conditions: &ConditionSet,
        limit: Option<usize>,
        offset: usize,
    ) -> DocStoreResult<Vec<String>> {
        let mut options = FindOptions::new()
            .prefix(prefix)
            .conditions(conditions.clone())
            .offset(offset);
        options.limit = limit;
        self.find_list(&options)
    }

    fn scan<F>(&self, options: &FindOptions, limit: Option<usize>, mut collect: F) -> DocStoreResult<()>
    where
        F: FnMut(String, Document),
    {
        let mut matched = 0;
        let mut collected = 0;

        for key in self.list(&options.prefix, true)? {
            if limit.is_some_and(|limit| collected >= limit) {
                break;
            }

            let document = match self.get(&key) {
                Ok(document) => document,
                Err(e) if e.kind() == &ErrorKind::NotFound => {
                    log::debug!("Document {} disappeared during scan", key);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !options.conditions.matches(&document) {
                continue;
            }

            matched += 1;
            if matched <= options.offset {
                continue;
            }

            collect(key, document);
            collected += 1;
        }

        log::debug!(
            "Scanned {} with {}: {} matched, {} collected",
            if options.prefix.is_empty() { "/" } else { options.prefix.as_str() },
            options.conditions,
            matched,
            collected
        );
        Ok(())
    }

    fn document_path(&self, key: &str) -> DocStoreResult<PathBuf> {
        let segments = key_segments(key)?;
        let mut path = self.config.root.clone();
        if let Some((last, parents)) = segments.split_last() {
            if last.starts_with(TEMP_FILE_PREFIX) {
                log::error!("Storage key {:?} uses the reserved prefix {:?}", key, TEMP_FILE_PREFIX);
                return Err(DocStoreError::new(
                    &format!("Storage key {:?} uses the reserved prefix {:?}", key, TEMP_FILE_PREFIX),
                    ErrorKind::InvalidKey,
                ));
            }
            for segment in parents {
                path.push(segment);
            }
            path.push(format!("{}.{}", last, self.config.extension));
        }
        Ok(path)
    }

    fn is_document_file(&self, path: &Path) -> bool {
        let temporary = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(TEMP_FILE_PREFIX));

        !temporary
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.config.extension)
    }

    fn key_of(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.config.root).ok()?.with_extension("");
        let segments: Option<Vec<&str>> = relative
            .components()
            .map(|component| match component {
                Component::Normal(name) => name.to_str(),
                _ => None,
            })
            .collect();
        let segments = segments?;
        if segments.is_empty() {
            None
        } else {
            let separator = KEY_SEPARATOR.to_string();
            Some(segments.join(separator.as_str()))
        }
    }
}
