use crate::common::{LIKE_ANY, LIKE_ONE};
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use regex::Regex;
use std::fmt::Display;

/// A compiled `LIKE` pattern.
///
/// `%` matches any run of characters, including none and including line
/// breaks. `_` matches exactly one character. Everything else is literal, and
/// the pattern must cover the whole value.
#[derive(Clone)]
pub struct LikePattern {
    pattern: String,
    regex: Regex,
}

impl LikePattern {
    pub fn compile(pattern: &str) -> DocStoreResult<LikePattern> {
        let mut source = String::with_capacity(pattern.len() + 8);
        source.push_str("(?s)^");

        let mut literal = String::new();
        for c in pattern.chars() {
            match c {
                LIKE_ANY | LIKE_ONE => {
                    source.push_str(&regex::escape(&literal));
                    literal.clear();
                    source.push_str(if c == LIKE_ANY { ".*" } else { "." });
                }
                _ => literal.push(c),
            }
        }
        source.push_str(&regex::escape(&literal));
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| {
            log::error!("Failed to compile LIKE pattern {:?}: {}", pattern, e);
            DocStoreError::new(
                &format!("Failed to compile LIKE pattern {:?}: {}", pattern, e),
                ErrorKind::InvalidCondition,
            )
        })?;

        Ok(LikePattern {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as it was written.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for LikePattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl std::fmt::Debug for LikePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LikePattern({:?})", self.pattern)
    }
}

impl Display for LikePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}
