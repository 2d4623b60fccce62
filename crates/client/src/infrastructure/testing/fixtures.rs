//! Builders for raw catalog records in the API's wire shape.

use serde_json::{json, Value};

use lorebook_domain::EntityKind;

/// A minimal raw record of the given kind, carrying only the display field.
pub fn raw_record(kind: EntityKind, id: &str, name: &str) -> Value {
    let display_field = match kind {
        EntityKind::Book | EntityKind::Movie => "title",
        _ => "name",
    };
    json!({
        "id": id,
        "type": kind.as_str(),
        "attributes": { display_field: name },
    })
}

/// A list response body wrapping the given records.
pub fn page_of(records: Vec<Value>) -> Value {
    json!({ "data": records })
}
