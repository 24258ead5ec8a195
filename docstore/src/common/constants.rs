// doc constants
pub const DOC_ID: &str = "_id";
pub const FIELD_SEPARATOR: char = '.';

// store constants
pub const KEY_SEPARATOR: char = '/';
pub const DEFAULT_EXTENSION: &str = "json";
pub const TEMP_FILE_PREFIX: &str = ".docstore";
pub const PRETTY_INDENT: &[u8] = b"    ";

// condition constants
pub const OPERATOR_SEPARATOR: char = ' ';
pub const LIKE_ANY: char = '%';
pub const LIKE_ONE: char = '_';

// object id constants
pub const OBJECT_ID_BYTES: usize = 12;
pub const OBJECT_ID_HEX_LEN: usize = OBJECT_ID_BYTES * 2;
