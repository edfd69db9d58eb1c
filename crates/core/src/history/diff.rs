//! Field-level diff between two versions of a record

use std::collections::BTreeSet;

use resplan_domain::FieldChange;
use serde_json::{Map, Value};

/// Top-level fields that differ between `old` and `new`.
///
/// Either side may be absent (create, delete). Fields listed in `ignored`
/// are skipped. Nested values are compared as a whole. Changes come back in
/// field-name order.
#[must_use]
pub fn calculate_diff(
    old: Option<&Value>,
    new: Option<&Value>,
    ignored: &[&str],
) -> Vec<FieldChange> {
    let empty = Map::new();
    let old = old.and_then(Value::as_object).unwrap_or(&empty);
    let new = new.and_then(Value::as_object).unwrap_or(&empty);

    let fields: BTreeSet<&String> = old.keys().chain(new.keys()).collect();

    fields
        .into_iter()
        .filter(|field| !ignored.contains(&field.as_str()))
        .filter_map(|field| {
            let before = old.get(field);
            let after = new.get(field);
            (before != after).then(|| FieldChange {
                field: field.clone(),
                old: before.cloned(),
                new: after.cloned(),
            })
        })
        .collect()
}
