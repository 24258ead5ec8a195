use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for docstore operations
///
/// Each kind describes one category of failure so callers can match on
/// [`DocStoreError::kind`] instead of parsing messages.
///
/// Write failures of a single document are not errors: `set`, `insert` and
/// `update` report them by returning `Ok(false)`.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::errors::{DocStoreError, ErrorKind, DocStoreResult};
///
/// fn example() -> DocStoreResult<()> {
///     Err(DocStoreError::new("Document not found", ErrorKind::NotFound))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// No document is stored under the requested key
    NotFound,
    /// Stored content could not be decoded into a document
    CorruptData,
    /// A condition map could not be parsed
    InvalidCondition,
    /// The requested operation or find mode does not exist
    UnsupportedOperation,
    /// A value of the wrong type was passed in
    InvalidInput,
    /// A storage key is empty or contains an empty, `.` or `..` segment
    InvalidKey,
    /// A document has no identity where one is required
    NotIdentifiable,
    /// A document in a batch could not be written
    WriteFailed,

    /// Generic IO error
    IOError,
    /// Permission denied for file operation
    PermissionDenied,
    /// Error encoding a document
    EncodingError,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::CorruptData => write!(f, "Corrupt data"),
            ErrorKind::InvalidCondition => write!(f, "Invalid condition"),
            ErrorKind::UnsupportedOperation => write!(f, "Unsupported operation"),
            ErrorKind::InvalidInput => write!(f, "Invalid input"),
            ErrorKind::InvalidKey => write!(f, "Invalid key"),
            ErrorKind::NotIdentifiable => write!(f, "Not identifiable"),
            ErrorKind::WriteFailed => write!(f, "Write failed"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom docstore error type.
///
/// `DocStoreError` carries a message, an [`ErrorKind`], an optional cause and
/// the backtrace captured where the error was created.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::errors::{DocStoreError, ErrorKind};
///
/// let err = DocStoreError::new("Document not found", ErrorKind::NotFound);
///
/// let cause = DocStoreError::new("IO failed", ErrorKind::IOError);
/// let err = DocStoreError::new_with_cause("Could not open store", ErrorKind::PermissionDenied, cause);
/// ```
#[derive(Clone)]
pub struct DocStoreError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<DocStoreError>>,
    backtrace: Backtrace,
}

impl DocStoreError {
    /// Creates a new `DocStoreError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        DocStoreError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new(),
        }
    }

    /// Creates a new `DocStoreError` with a cause error.
    ///
    /// The cause is kept so that `Debug` output and [`Error::source`] show
    /// the whole chain.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: DocStoreError) -> Self {
        DocStoreError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&DocStoreError> {
        self.cause.as_deref()
    }
}

impl Display for DocStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for DocStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for DocStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for docstore operations.
pub type DocStoreResult<T> = Result<T, DocStoreError>;

impl From<std::io::Error> for DocStoreError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IOError,
        };
        DocStoreError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<serde_json::Error> for DocStoreError {
    fn from(err: serde_json::Error) -> Self {
        let error_kind = match err.classify() {
            serde_json::error::Category::Io => ErrorKind::IOError,
            serde_json::error::Category::Syntax
            | serde_json::error::Category::Data
            | serde_json::error::Category::Eof => ErrorKind::CorruptData,
        };
        DocStoreError::new(&format!("JSON error: {}", err), error_kind)
    }
}

impl From<walkdir::Error> for DocStoreError {
    fn from(err: walkdir::Error) -> Self {
        let message = format!("Directory walk error: {}", err);
        match err.into_io_error() {
            Some(io) => DocStoreError::new_with_cause(&message, ErrorKind::IOError, io.into()),
            None => DocStoreError::new(&message, ErrorKind::IOError),
        }
    }
}
