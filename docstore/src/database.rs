use crate::collection::{Document, IdGenerator, ObjectIdGenerator};
use crate::common::join_key;
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use crate::store::{DocumentStore, FindMode, FindOptions, FindResult};
use std::path::Path;
use std::sync::Arc;

/// A [DocumentStore] that assigns document identities on insert.
///
/// Inserted documents get a fresh `_id` and are stored under that id,
/// optionally below a prefix. Updates write a document back under the key it
/// was read from or inserted under, or else under its id.
///
/// Batch operations stop at the first failing document. Documents written
/// before the failure stay written.
///
/// ```rust,no_run
/// use docstore::{doc, DocumentDatabase};
///
/// let db = DocumentDatabase::open("/var/lib/contacts")?;
/// let mut contact = doc! { name: "Tony", age: 35 };
/// assert!(db.insert(&mut contact, Some("europe"))?);
///
/// contact.set("age", 36);
/// assert!(db.update(&contact)?);
/// # Ok::<(), docstore::errors::DocStoreError>(())
/// ```
#[derive(Clone)]
pub struct DocumentDatabase {
    store: DocumentStore,
    id_generator: Arc<dyn IdGenerator>,
}

impl DocumentDatabase {
    pub fn new(store: DocumentStore) -> Self {
        Self::with_id_generator(store, Arc::new(ObjectIdGenerator::new()))
    }

    pub fn open(root: impl AsRef<Path>) -> DocStoreResult<Self> {
        Ok(Self::new(DocumentStore::open(root)?))
    }

    pub fn with_id_generator(store: DocumentStore, id_generator: Arc<dyn IdGenerator>) -> Self {
        DocumentDatabase {
            store,
            id_generator,
        }
    }

    /// The underlying store, for keyed access.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Stores a document under a freshly generated id.
    ///
    /// Returns `Ok(false)` without writing anything when the document already
    /// has an identity. The id and the storage key are attached to `document`;
    /// if the write fails the id is removed again, so the same document can be
    /// inserted again later.
    pub fn insert(&self, document: &mut Document, prefix: Option<&str>) -> DocStoreResult<bool> {
        if document.has_id() {
            log::debug!("Document already has identity {:?}, not inserting", document.id());
            return Ok(false);
        }

        let id = self.id_generator.generate();
        document.set_id(&id);
        let key = join_key(prefix.unwrap_or_default(), &id);

        match self.store.set(&key, document) {
            Ok(true) => {
                document.set_key(key);
                Ok(true)
            }
            Ok(false) => {
                document.clear_id();
                Ok(false)
            }
            Err(e) => {
                document.clear_id();
                Err(e)
            }
        }
    }

    /// Inserts every document in order.
    ///
    /// # Errors
    ///
    /// Fails with `WriteFailed` on the first document that cannot be inserted,
    /// including one that already has an identity. Earlier documents are not
    /// rolled back. An empty batch returns `Ok(false)`.
    pub fn insert_many(&self, documents: &mut [Document], prefix: Option<&str>) -> DocStoreResult<bool> {
        for (index, document) in documents.iter_mut().enumerate() {
            let inserted = self.insert(document, prefix).map_err(|e| {
                log::error!("Error saving document {} of batch: {}", index, e);
                DocStoreError::new_with_cause(
                    &format!("Error saving document {} of batch", index),
                    ErrorKind::WriteFailed,
                    e,
                )
            })?;

            if !inserted {
                log::error!("Error saving document {} of batch", index);
                return Err(DocStoreError::new(
                    &format!("Error saving document {} of batch", index),
                    ErrorKind::WriteFailed,
                ));
            }
        }
        Ok(!documents.is_empty())
    }

    /// Writes a previously stored document back.
    ///
    /// The document is written under the key it was read from, or under its
    /// id when it was not read from a store. Returns `Ok(false)` when the
    /// document has no identity or the write fails.
    pub fn update(&self, document: &Document) -> DocStoreResult<bool> {
        match update_key(document) {
            Some(key) => self.store.set(key, document),
            None => {
                log::debug!("Document has no identity, not updating");
                Ok(false)
            }
        }
    }

    /// Updates every document in order.
    ///
    /// # Errors
    ///
    /// * `NotIdentifiable` for the first document without an identity
    /// * `WriteFailed` for the first document that cannot be written
    ///
    /// Earlier documents stay updated. An empty batch returns `Ok(false)`.
    pub fn update_many(&self, documents: &[Document]) -> DocStoreResult<bool> {
        for (index, document) in documents.iter().enumerate() {
            let Some(key) = update_key(document) else {
                log::error!("Document {} of batch has no identity", index);
                return Err(DocStoreError::new(
                    &format!("Document {} of batch has no identity", index),
                    ErrorKind::NotIdentifiable,
                ));
            };

            if !self.store.set(key, document)? {
                log::error!("Error updating document {} of batch", index);
                return Err(DocStoreError::new(
                    &format!("Error updating document {} of batch", index),
                    ErrorKind::WriteFailed,
                ));
            }
        }
        Ok(!documents.is_empty())
    }

    pub fn get(&self, key: &str) -> DocStoreResult<Document> {
        self.store.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.store.has(key)
    }

    pub fn delete(&self, key: &str) -> DocStoreResult<bool> {
        self.store.delete(key)
    }

    pub fn list(&self, prefix: &str, recursive: bool) -> DocStoreResult<Vec<String>> {
        self.store.list(prefix, recursive)
    }

    pub fn find(&self, mode: FindMode, options: &FindOptions) -> DocStoreResult<FindResult> {
        self.store.find(mode, options)
    }
}

fn update_key(document: &Document) -> Option<&str> {
    if !document.has_id() {
        return None;
    }
    document.key().or_else(|| document.id())
}
