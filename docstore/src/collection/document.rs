use crate::common::{Value, DOC_ID, PRETTY_INDENT};
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display};
use std::io::Write;

/// A schema-less document: an ordered bag of named [Value]s.
///
/// Fields keep their insertion order, which is also the order they are
/// written to disk. The `_id` field is reserved for the identity assigned by
/// [`crate::DocumentDatabase`]; it is stored and serialized like any other
/// field but always kept in first position by [`Document::set_id`].
///
/// A field holding [`Value::Null`] is treated as unset by [`Document::get`]
/// and [`Document::has`], while still being written out as `null`.
///
/// Documents read from a [`crate::DocumentStore`] carry the key they were
/// read from, available through [`Document::key`]. The key is metadata: it is
/// not part of the field bag, not serialized and ignored by equality.
///
/// # Examples
///
/// ```rust
/// use docstore::doc;
/// use docstore::collection::Document;
///
/// let mut document = doc! {
///     name: "Tony",
///     age: 35,
///     emails: ["tony@example.com"],
/// };
/// document.set("city", "London");
/// assert!(document.has("city"));
/// assert_eq!(document.get("age").and_then(|v| v.as_i64()), Some(35));
/// ```
#[derive(Clone, Default)]
pub struct Document {
    data: IndexMap<String, Value>,
    key: Option<String>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
            key: None,
        }
    }

    /// Creates a document from an ordered field map.
    pub fn from_map(data: IndexMap<String, Value>) -> Self {
        Document { data, key: None }
    }

    /// Parses a JSON object into a document.
    ///
    /// # Errors
    ///
    /// * `CorruptData` if the text is not valid JSON
    /// * `InvalidInput` if the JSON is valid but not an object
    pub fn from_json(json: &str) -> DocStoreResult<Document> {
        let value: Value = serde_json::from_str(json)?;
        Document::try_from(value)
    }

    /// Decodes a document previously produced by [`Document::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> DocStoreResult<Document> {
        let value: Value = serde_json::from_slice(bytes)?;
        Document::try_from(value)
    }

    pub(crate) fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub(crate) fn set_key(&mut self, key: impl Into<String>) {
        self.key = Some(key.into());
    }

    /// The key this document was read from or inserted under, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of top level fields.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the value of a field, or `None` if the field is absent or null.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field).filter(|v| !v.is_null())
    }

    /// Returns the value of a field, or `default` if the field is absent or null.
    pub fn get_or<'a>(&'a self, field: &str, default: &'a Value) -> &'a Value {
        self.get(field).unwrap_or(default)
    }

    /// Sets a field, overwriting any previous value. Values are stored
    /// exactly as given; no coercion takes place.
    pub fn set<T: Into<Value>>(&mut self, field: impl Into<String>, value: T) {
        self.data.insert(field.into(), value.into());
    }

    /// Sets several fields at once, in iteration order. Later entries win.
    pub fn set_all<I, K, V>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (field, value) in fields {
            self.set(field, value);
        }
    }

    /// Checks if a field is set to a non-null value.
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Removes a field. Returns `true` if the field held a non-null value.
    pub fn unset(&mut self, field: &str) -> bool {
        self.data
            .shift_remove(field)
            .is_some_and(|value| !value.is_null())
    }

    /// Returns the document identity, if one has been assigned.
    ///
    /// Only a non-empty string in `_id` counts as an identity.
    pub fn id(&self) -> Option<&str> {
        self.data
            .get(DOC_ID)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Assigns the document identity and returns the current one.
    ///
    /// The `_id` field is moved to the first position. An empty `id` leaves
    /// the document unchanged.
    pub fn set_id(&mut self, id: &str) -> Option<&str> {
        if !id.is_empty() {
            self.data
                .shift_insert(0, DOC_ID.to_string(), Value::String(id.to_string()));
        }
        self.id()
    }

    pub(crate) fn clear_id(&mut self) {
        self.data.shift_remove(DOC_ID);
    }

    /// Checks if this document has an identity.
    pub fn has_id(&self) -> bool {
        self.id().is_some()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.data.iter()
    }

    /// Returns the whole field bag.
    pub fn to_map(&self) -> &IndexMap<String, Value> {
        &self.data
    }

    pub fn into_map(self) -> IndexMap<String, Value> {
        self.data
    }

    /// Serializes the field bag as compact JSON.
    pub fn to_json(&self) -> DocStoreResult<String> {
        serde_json::to_string(self).map_err(|e| {
            log::error!("Failed to encode document as JSON: {}", e);
            DocStoreError::new(
                &format!("Failed to encode document as JSON: {}", e),
                ErrorKind::EncodingError,
            )
        })
    }

    /// Serializes the field bag as JSON indented with four spaces.
    pub fn to_pretty_json(&self) -> DocStoreResult<String> {
        let mut buffer = Vec::new();
        self.write_json(&mut buffer, true)?;
        String::from_utf8(buffer).map_err(|e| {
            DocStoreError::new(
                &format!("Encoded document is not UTF-8: {}", e),
                ErrorKind::EncodingError,
            )
        })
    }

    /// Encodes the document into a portable byte representation.
    pub fn to_bytes(&self) -> DocStoreResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_json(&mut buffer, false)?;
        Ok(buffer)
    }

    pub(crate) fn write_json<W: Write>(&self, writer: W, pretty: bool) -> DocStoreResult<()> {
        let result = if pretty {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(PRETTY_INDENT);
            let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
            self.serialize(&mut serializer)
        } else {
            let mut serializer = serde_json::Serializer::new(writer);
            self.serialize(&mut serializer)
        };

        result.map_err(|e| {
            log::error!("Failed to write document as JSON: {}", e);
            DocStoreError::new(
                &format!("Failed to write document as JSON: {}", e),
                ErrorKind::EncodingError,
            )
        })
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl TryFrom<Value> for Document {
    type Error = DocStoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Document(doc) => Ok(doc),
            other => {
                log::error!("Expected a mapping to build a document, found {}", other);
                Err(DocStoreError::new(
                    &format!("Expected a mapping to build a document, found {}", other),
                    ErrorKind::InvalidInput,
                ))
            }
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexMap::<String, Value>::deserialize(deserializer).map(Document::from_map)
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = self.to_pretty_json().map_err(|_| std::fmt::Error)?;
        write!(f, "{}", json)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Document::new();
        doc.set_all(iter);
        doc
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// Keys may be bare identifiers or string literals. Values that are more than
/// one token (negative numbers, paths, calls) must be wrapped in parentheses.
///
/// ```rust
/// use docstore::doc;
///
/// let empty = doc!{};
///
/// let base = 100;
/// let contact = doc!{
///     name: "Tony",
///     "age": 35,
///     score: (base * 2),
///     addresses: [{ street: "25 corp road" }],
/// };
/// assert_eq!(contact.size(), 4);
/// ```
#[macro_export]
macro_rules! doc {
    ({}) => {
        $crate::collection::Document::new()
    };

    () => {
        $crate::collection::Document::new()
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.set($crate::collection::normalize(stringify!($key)), $crate::doc_value!($value));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
#[macro_export]
macro_rules! doc_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
