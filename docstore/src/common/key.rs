use crate::common::KEY_SEPARATOR;
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use smallvec::SmallVec;

pub(crate) type KeySegments<'a> = SmallVec<[&'a str; 8]>;

/// Splits a storage key into its path segments, rejecting keys that would
/// escape the store root or produce ambiguous paths.
pub(crate) fn key_segments(key: &str) -> DocStoreResult<KeySegments<'_>> {
    if key.is_empty() {
        log::error!("Storage key cannot be empty");
        return Err(DocStoreError::new(
            "Storage key cannot be empty",
            ErrorKind::InvalidKey,
        ));
    }

    if key.contains('\\') || key.contains('\0') {
        log::error!("Storage key {:?} contains a forbidden character", key);
        return Err(DocStoreError::new(
            &format!("Storage key {:?} contains a forbidden character", key),
            ErrorKind::InvalidKey,
        ));
    }

    let segments: KeySegments = key.split(KEY_SEPARATOR).collect();
    if let Some(bad) = segments.iter().find(|s| s.is_empty() || **s == "." || **s == "..") {
        log::error!("Storage key {:?} has an invalid segment {:?}", key, bad);
        return Err(DocStoreError::new(
            &format!("Storage key {:?} has an invalid segment {:?}", key, bad),
            ErrorKind::InvalidKey,
        ));
    }

    Ok(segments)
}

/// Trims leading and trailing separators from an optional prefix.
pub(crate) fn normalize_prefix(prefix: &str) -> &str {
    prefix.trim_matches(KEY_SEPARATOR)
}

/// Joins a prefix and a key, skipping the prefix when it is empty.
pub(crate) fn join_key(prefix: &str, key: &str) -> String {
    let prefix = normalize_prefix(prefix);
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", prefix, KEY_SEPARATOR, key)
    }
}
