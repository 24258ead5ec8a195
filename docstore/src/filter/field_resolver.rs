use crate::collection::Document;
use crate::common::{Value, FIELD_SEPARATOR};
use smallvec::SmallVec;
use std::borrow::Cow;

type FieldPath<'a> = SmallVec<[&'a str; 4]>;

/// Resolves a dotted field path against a document.
///
/// Each segment indexes into a nested document. When a list is reached, the
/// rest of the path is applied to every element and the non-null results are
/// collected into a new list, so `addresses.street` yields every street of
/// every address. Returns `None` when nothing resolves. Null values count as
/// missing.
pub(crate) fn resolve_field<'a>(document: &'a Document, field: &str) -> Option<Cow<'a, Value>> {
    let path: FieldPath = field.split(FIELD_SEPARATOR).collect();
    resolve_in_document(document, &path)
}

fn resolve_in_document<'a>(document: &'a Document, path: &[&str]) -> Option<Cow<'a, Value>> {
    let (segment, rest) = path.split_first()?;
    let value = document.get(segment)?;
    resolve_in_value(value, rest)
}

fn resolve_in_value<'a>(value: &'a Value, path: &[&str]) -> Option<Cow<'a, Value>> {
    if path.is_empty() {
        return Some(Cow::Borrowed(value));
    }

    match value {
        Value::Document(document) => resolve_in_document(document, path),
        Value::Array(items) => {
            let values: Vec<Value> = items
                .iter()
                .filter_map(|item| resolve_in_value(item, path))
                .map(Cow::into_owned)
                .collect();

            if values.is_empty() {
                None
            } else {
                Some(Cow::Owned(Value::Array(values)))
            }
        }
        _ => None,
    }
}
