use crate::collection::Document;
use crate::common::{Value, OPERATOR_SEPARATOR};
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use crate::filter::field_resolver::resolve_field;
use crate::filter::{LikePattern, Operator};
use itertools::Itertools;
use std::fmt::Display;

/// The right-hand side of a [Condition].
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A scalar or list compared against the field value.
    Value(Value),
    /// A compiled `LIKE`/`NOT LIKE` pattern.
    Pattern(LikePattern),
}

/// A single `field OPERATOR operand` clause.
///
/// Conditions are built by parsing a condition key such as `"age >="` or
/// `"name NOT LIKE"` together with its operand. A key without an operator is
/// an equality test.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    field: String,
    operator: Operator,
    operand: Operand,
}

impl Condition {
    /// Parses a condition key and its operand.
    ///
    /// The key is split at its first space: the part before is the field path,
    /// the part after is the operator token, taken verbatim.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCondition` when the field is empty, the operator is not
    /// supported, or a `LIKE`/`NOT LIKE` operand is not a string.
    pub fn parse(condition_key: &str, operand: Value) -> DocStoreResult<Condition> {
        let (field, operator) = match condition_key.split_once(OPERATOR_SEPARATOR) {
            Some((field, token)) => (field, token.parse::<Operator>()?),
            None => (condition_key, Operator::Equal),
        };

        if field.is_empty() {
            log::error!("Condition {:?} has no field", condition_key);
            return Err(DocStoreError::new(
                &format!("Condition {:?} has no field", condition_key),
                ErrorKind::InvalidCondition,
            ));
        }

        let operand = if operator.is_pattern() {
            match operand {
                Value::String(pattern) => Operand::Pattern(LikePattern::compile(&pattern)?),
                other => {
                    log::error!("Non string value {} for {} on {}", other, operator, field);
                    return Err(DocStoreError::new(
                        &format!("Non string value for LIKE/NOT LIKE on {}", field),
                        ErrorKind::InvalidCondition,
                    ));
                }
            }
        } else {
            Operand::Value(operand)
        };

        Ok(Condition {
            field: field.to_string(),
            operator,
            operand,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Evaluates this condition against a document. Never fails: values of
    /// the wrong shape simply do not match.
    pub fn matches(&self, document: &Document) -> bool {
        let resolved = resolve_field(document, &self.field);
        let value = resolved.as_deref();

        match (&self.operand, self.operator.canonical()) {
            (Operand::Value(operand), Operator::Equal) => equals(value, operand),
            (Operand::Value(operand), Operator::NotEqual) => not_equals(value, operand),
            (Operand::Value(operand), Operator::Greater) => compare(value, operand, |a, b| a > b),
            (Operand::Value(operand), Operator::GreaterEqual) => {
                compare(value, operand, |a, b| a >= b)
            }
            (Operand::Value(operand), Operator::Lesser) => compare(value, operand, |a, b| a < b),
            (Operand::Value(operand), Operator::LesserEqual) => {
                compare(value, operand, |a, b| a <= b)
            }
            (Operand::Pattern(pattern), Operator::Like) => any_like(value, pattern),
            (Operand::Pattern(pattern), Operator::NotLike) => !any_like(value, pattern),
            _ => false,
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.operand {
            Operand::Value(value) => write!(f, "{} {} {}", self.field, self.operator, value),
            Operand::Pattern(pattern) => {
                write!(f, "{} {} {:?}", self.field, self.operator, pattern.pattern())
            }
        }
    }
}

// `=`: a list value matches when any element is in a list operand or equals a
// scalar operand; a scalar value matches when it is a member of a list
// operand; otherwise the two must be equal. A missing value compares as null.
fn equals(value: Option<&Value>, operand: &Value) -> bool {
    let null = Value::Null;
    let value = value.unwrap_or(&null);

    match (value, operand) {
        (Value::Array(values), Value::Array(operands)) => {
            values.iter().any(|v| operands.contains(v))
        }
        (Value::Array(values), _) => values.contains(operand),
        (_, Value::Array(operands)) => operands.contains(value),
        _ => value == operand,
    }
}

// `!=`: negates each branch of `=` on its own. A list value matches as soon as
// none of its elements overlaps the operand.
fn not_equals(value: Option<&Value>, operand: &Value) -> bool {
    let null = Value::Null;
    let value = value.unwrap_or(&null);

    match (value, operand) {
        (Value::Array(values), Value::Array(operands)) => {
            !values.iter().any(|v| operands.contains(v))
        }
        (Value::Array(values), _) => !values.contains(operand),
        (_, Value::Array(operands)) => !operands.contains(value),
        _ => value != operand,
    }
}

fn compare(value: Option<&Value>, operand: &Value, op: impl Fn(f64, f64) -> bool) -> bool {
    match (value.and_then(Value::as_number), operand.as_number()) {
        (Some(value), Some(operand)) => op(value, operand),
        _ => false,
    }
}

fn any_like(value: Option<&Value>, pattern: &LikePattern) -> bool {
    let candidates: &[Value] = match value {
        None => &[],
        Some(Value::Array(values)) => values,
        Some(scalar) => std::slice::from_ref(scalar),
    };

    candidates
        .iter()
        .filter_map(Value::as_match_text)
        .any(|text| pattern.is_match(&text))
}

/// An immutable conjunction of [Condition]s.
///
/// A document matches when every condition matches. The empty set matches
/// every document.
///
/// # Examples
///
/// ```rust
/// use docstore::doc;
/// use docstore::filter::ConditionSet;
///
/// let conditions = ConditionSet::new(vec![("age >", 30)])?;
/// assert!(conditions.matches(&doc! { name: "Tony", age: 35 }));
/// assert!(!conditions.matches(&doc! { name: "Cathy", age: 22 }));
/// # Ok::<(), docstore::errors::DocStoreError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSet {
    conditions: Vec<Condition>,
}

impl ConditionSet {
    /// Parses every `(condition key, operand)` pair. Fails on the first
    /// invalid entry, before any document is evaluated.
    pub fn new<I, K, V>(conditions: I) -> DocStoreResult<ConditionSet>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let conditions = conditions
            .into_iter()
            .map(|(key, operand)| Condition::parse(key.as_ref(), operand.into()))
            .collect::<DocStoreResult<Vec<_>>>()?;
        Ok(ConditionSet { conditions })
    }

    /// Builds a condition set from a document used as a condition map, e.g.
    /// `doc! { "age >": 30, "name LIKE": "T%" }`.
    pub fn from_document(document: &Document) -> DocStoreResult<ConditionSet> {
        ConditionSet::new(document.iter().map(|(key, value)| (key, value.clone())))
    }

    /// A condition set that matches every document.
    pub fn all() -> ConditionSet {
        ConditionSet::default()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.conditions.iter().all(|condition| condition.matches(document))
    }
}

impl TryFrom<&Document> for ConditionSet {
    type Error = DocStoreError;

    fn try_from(document: &Document) -> Result<Self, Self::Error> {
        ConditionSet::from_document(document)
    }
}

impl Display for ConditionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.conditions.is_empty() {
            return write!(f, "(all)");
        }
        write!(f, "({})", self.conditions.iter().join(" AND "))
    }
}
