use crate::common::Value;
use crate::errors::DocStoreResult;
use crate::filter::{ConditionSet, Operator};

/// Fluent builder for a [ConditionSet].
///
/// Each method appends one clause using the same `"field OPERATOR"` keys a
/// condition map would use, and [Conditions::build] parses them with the same
/// rules, so the two ways of writing a query always agree.
///
/// ```rust
/// use docstore::doc;
/// use docstore::filter::Conditions;
///
/// let conditions = Conditions::new()
///     .gte("age", 30)
///     .like("name", "T%")
///     .build()?;
/// assert!(conditions.matches(&doc! { name: "Tony", age: 35 }));
/// # Ok::<(), docstore::errors::DocStoreError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    clauses: Vec<(String, Value)>,
}

impl Conditions {
    pub fn new() -> Self {
        Conditions { clauses: Vec::new() }
    }

    /// Matches documents where the field equals the value, or overlaps it
    /// when either side is a list.
    #[inline]
    pub fn eq<T: Into<Value>>(self, field: &str, value: T) -> Self {
        self.clause(field, Operator::Equal, value.into())
    }

    #[inline]
    pub fn ne<T: Into<Value>>(self, field: &str, value: T) -> Self {
        self.clause(field, Operator::NotEqual, value.into())
    }

    /// Matches documents where the field is one of the values.
    #[inline]
    pub fn is_in<T: Into<Value>>(self, field: &str, values: Vec<T>) -> Self {
        self.clause(field, Operator::In, Value::from(values))
    }

    #[inline]
    pub fn not_in<T: Into<Value>>(self, field: &str, values: Vec<T>) -> Self {
        self.clause(field, Operator::NotIn, Value::from(values))
    }

    #[inline]
    pub fn gt<T: Into<Value>>(self, field: &str, value: T) -> Self {
        self.clause(field, Operator::Greater, value.into())
    }

    #[inline]
    pub fn gte<T: Into<Value>>(self, field: &str, value: T) -> Self {
        self.clause(field, Operator::GreaterEqual, value.into())
    }

    #[inline]
    pub fn lt<T: Into<Value>>(self, field: &str, value: T) -> Self {
        self.clause(field, Operator::Lesser, value.into())
    }

    #[inline]
    pub fn lte<T: Into<Value>>(self, field: &str, value: T) -> Self {
        self.clause(field, Operator::LesserEqual, value.into())
    }

    /// Matches documents where the field matches a `LIKE` pattern.
    #[inline]
    pub fn like(self, field: &str, pattern: &str) -> Self {
        self.clause(field, Operator::Like, Value::from(pattern))
    }

    #[inline]
    pub fn not_like(self, field: &str, pattern: &str) -> Self {
        self.clause(field, Operator::NotLike, Value::from(pattern))
    }

    fn clause(mut self, field: &str, operator: Operator, value: Value) -> Self {
        let key = match operator {
            Operator::Equal => field.to_string(),
            other => format!("{} {}", field, other),
        };
        self.clauses.push((key, value));
        self
    }

    /// Parses the collected clauses into a [ConditionSet].
    pub fn build(self) -> DocStoreResult<ConditionSet> {
        ConditionSet::new(self.clauses)
    }
}
