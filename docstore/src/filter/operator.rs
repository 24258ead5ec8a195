use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use std::fmt::Display;
use std::str::FromStr;

/// Comparison operators accepted in a condition key.
///
/// `IN` and `NOT IN` are kept as written so conditions display the way they
/// were declared, but they evaluate exactly like `=` and `!=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    In,
    NotIn,
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
    Like,
    NotLike,
}

impl Operator {
    /// The token used for this operator in a condition key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::Lesser => "<",
            Operator::LesserEqual => "<=",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
        }
    }

    /// Collapses `IN`/`NOT IN` onto the equality operator they evaluate as.
    pub(crate) fn canonical(self) -> Operator {
        match self {
            Operator::In => Operator::Equal,
            Operator::NotIn => Operator::NotEqual,
            other => other,
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Operator::Like | Operator::NotLike)
    }
}

impl FromStr for Operator {
    type Err = DocStoreError;

    /// Parses an operator token. Tokens are case sensitive and must match
    /// exactly, so `like` or `=>` are rejected.
    fn from_str(token: &str) -> DocStoreResult<Self> {
        match token {
            "=" => Ok(Operator::Equal),
            "!=" => Ok(Operator::NotEqual),
            "IN" => Ok(Operator::In),
            "NOT IN" => Ok(Operator::NotIn),
            ">" => Ok(Operator::Greater),
            ">=" => Ok(Operator::GreaterEqual),
            "<" => Ok(Operator::Lesser),
            "<=" => Ok(Operator::LesserEqual),
            "LIKE" => Ok(Operator::Like),
            "NOT LIKE" => Ok(Operator::NotLike),
            _ => {
                log::error!("Invalid operator {}", token);
                Err(DocStoreError::new(
                    &format!("Invalid operator {}", token),
                    ErrorKind::InvalidCondition,
                ))
            }
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
