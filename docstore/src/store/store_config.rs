use crate::common::{DEFAULT_EXTENSION, KEY_SEPARATOR};
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use crate::store::DocumentStore;
use std::path::{Path, PathBuf};

/// Settings of a [DocumentStore].
///
/// * `root` - directory holding the documents, created on open
/// * `extension` - file extension of stored documents, `json` by default
/// * `scratch_dir` - where temporary files are written before being renamed
///   into place; defaults to the directory of the target file so the rename
///   stays on one filesystem
/// * `pretty` - write pretty JSON indented by four spaces (default) or
///   compact JSON
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub(crate) root: PathBuf,
    pub(crate) extension: String,
    pub(crate) scratch_dir: Option<PathBuf>,
    pub(crate) pretty: bool,
}

impl StoreConfig {
    pub fn new(root: impl AsRef<Path>) -> Self {
        StoreConfig {
            root: root.as_ref().to_path_buf(),
            extension: DEFAULT_EXTENSION.to_string(),
            scratch_dir: None,
            pretty: true,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn scratch_dir(&self) -> Option<&Path> {
        self.scratch_dir.as_deref()
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }

    pub fn set_extension(&mut self, extension: &str) -> DocStoreResult<()> {
        if extension.is_empty() {
            log::error!("Document extension cannot be empty");
            return Err(DocStoreError::new(
                "Document extension cannot be empty",
                ErrorKind::InvalidInput,
            ));
        }

        if extension.starts_with('.') || extension.contains(KEY_SEPARATOR) || extension.contains('\\') {
            log::error!("Invalid document extension {:?}", extension);
            return Err(DocStoreError::new(
                &format!("Invalid document extension {:?}", extension),
                ErrorKind::InvalidInput,
            ));
        }

        self.extension = extension.to_string();
        Ok(())
    }

    pub fn set_scratch_dir(&mut self, scratch_dir: impl AsRef<Path>) -> DocStoreResult<()> {
        let scratch_dir = scratch_dir.as_ref();
        if scratch_dir.as_os_str().is_empty() {
            log::error!("Scratch directory cannot be empty");
            return Err(DocStoreError::new(
                "Scratch directory cannot be empty",
                ErrorKind::InvalidInput,
            ));
        }

        self.scratch_dir = Some(scratch_dir.to_path_buf());
        Ok(())
    }

    pub fn set_pretty(&mut self, pretty: bool) {
        self.pretty = pretty;
    }
}

/// Fluent builder for opening a [DocumentStore].
///
/// The first invalid setting is remembered and returned by [StoreBuilder::open];
/// later settings are ignored once an error has been captured.
///
/// ```rust,no_run
/// use docstore::DocumentStore;
///
/// let store = DocumentStore::builder("/var/lib/books")
///     .extension("doc")
///     .pretty(false)
///     .open()?;
/// # Ok::<(), docstore::errors::DocStoreError>(())
/// ```
pub struct StoreBuilder {
    error: Option<DocStoreError>,
    config: StoreConfig,
}

impl StoreBuilder {
    pub fn new(root: impl AsRef<Path>) -> Self {
        StoreBuilder {
            error: None,
            config: StoreConfig::new(root),
        }
    }

    pub fn extension(mut self, extension: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_extension(extension) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn scratch_dir(mut self, scratch_dir: impl AsRef<Path>) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_scratch_dir(scratch_dir) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.config.set_pretty(pretty);
        self
    }

    pub fn open(self) -> DocStoreResult<DocumentStore> {
        if let Some(error) = self.error {
            return Err(error);
        }
        DocumentStore::with_config(self.config)
    }
}
