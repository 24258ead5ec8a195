use crate::collection::Document;
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use crate::filter::ConditionSet;
use std::fmt::Display;
use std::str::FromStr;

/// What a find returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindMode {
    /// The first matching document, if any.
    First,
    /// Every matching document.
    All,
    /// The keys of the matching documents.
    List,
    /// The number of matching documents.
    Count,
}

impl FindMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindMode::First => "first",
            FindMode::All => "all",
            FindMode::List => "list",
            FindMode::Count => "count",
        }
    }
}

impl FromStr for FindMode {
    type Err = DocStoreError;

    fn from_str(name: &str) -> DocStoreResult<Self> {
        match name {
            "first" => Ok(FindMode::First),
            "all" => Ok(FindMode::All),
            "list" => Ok(FindMode::List),
            "count" => Ok(FindMode::Count),
            _ => {
                log::error!("Unknown find mode {}", name);
                Err(DocStoreError::new(
                    &format!("Unknown find mode {}", name),
                    ErrorKind::UnsupportedOperation,
                ))
            }
        }
    }
}

impl Display for FindMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of a find, shaped by its [FindMode].
#[derive(Debug, Clone, PartialEq)]
pub enum FindResult {
    First(Option<Document>),
    All(Vec<Document>),
    List(Vec<String>),
    Count(usize),
}

impl FindResult {
    pub fn into_first(self) -> Option<Document> {
        match self {
            FindResult::First(document) => document,
            FindResult::All(documents) => documents.into_iter().next(),
            _ => None,
        }
    }

    pub fn into_documents(self) -> Vec<Document> {
        match self {
            FindResult::First(document) => document.into_iter().collect(),
            FindResult::All(documents) => documents,
            _ => Vec::new(),
        }
    }

    pub fn into_keys(self) -> Vec<String> {
        match self {
            FindResult::First(document) => document
                .and_then(|d| d.key().map(String::from))
                .into_iter()
                .collect(),
            FindResult::All(documents) => documents
                .iter()
                .filter_map(|d| d.key().map(String::from))
                .collect(),
            FindResult::List(keys) => keys,
            FindResult::Count(_) => Vec::new(),
        }
    }

    /// Number of results carried, or the count itself for [FindResult::Count].
    pub fn count(&self) -> usize {
        match self {
            FindResult::First(document) => usize::from(document.is_some()),
            FindResult::All(documents) => documents.len(),
            FindResult::List(keys) => keys.len(),
            FindResult::Count(count) => *count,
        }
    }
}

/// Parameters of a find: where to look, what to match and which slice of
/// the matches to return.
///
/// `offset` skips that many matches in scan order, `limit` stops once that
/// many have been collected.
///
/// ```rust
/// use docstore::filter::Conditions;
/// use docstore::store::FindOptions;
///
/// let options = FindOptions::new()
///     .prefix("contacts")
///     .conditions(Conditions::new().gt("age", 30).build()?)
///     .offset(10)
///     .limit(5);
/// # Ok::<(), docstore::errors::DocStoreError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub(crate) prefix: String,
    pub(crate) conditions: ConditionSet,
    pub(crate) limit: Option<usize>,
    pub(crate) offset: usize,
}

pub fn limit_to(limit: usize) -> FindOptions {
    FindOptions::new().limit(limit)
}

pub fn skip_by(offset: usize) -> FindOptions {
    FindOptions::new().offset(offset)
}

impl FindOptions {
    pub fn new() -> FindOptions {
        FindOptions {
            prefix: String::new(),
            conditions: ConditionSet::all(),
            limit: None,
            offset: 0,
        }
    }

    pub fn prefix(mut self, prefix: &str) -> FindOptions {
        self.prefix = prefix.to_string();
        self
    }

    pub fn conditions(mut self, conditions: ConditionSet) -> FindOptions {
        self.conditions = conditions;
        self
    }

    pub fn limit(mut self, limit: usize) -> FindOptions {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> FindOptions {
        self.offset = offset;
        self
    }

    pub fn get_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn get_conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn get_offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn validate(&self) -> DocStoreResult<()> {
        if self.limit == Some(0) {
            log::error!("Find limit must be a positive number");
            return Err(DocStoreError::new(
                "Find limit must be a positive number",
                ErrorKind::InvalidInput,
            ));
        }
        Ok(())
    }
}
