//! Field-level change summaries for audit entries

use std::collections::BTreeSet;

use serde_json::Value;

/// Longest string value shown verbatim in a summary
const MAX_STRING_CHARS: usize = 50;

/// Summarize what changed between two serialized records.
///
/// Objects are compared field by field at the top level, e.g.
/// `amount: 30000 -> 35000, description: "x" -> (none)`. Returns `None` when
/// nothing changed.
pub fn describe_changes(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(old), Value::Object(new)) = (before, after) else {
        return (before != after).then(|| format!("{} -> {}", render(before), render(after)));
    };

    let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
    let changes: Vec<String> = keys
        .into_iter()
        .filter_map(|key| match (old.get(key), new.get(key)) {
            (Some(a), Some(b)) if a == b => None,
            (a, b) => Some(format!(
                "{}: {} -> {}",
                key,
                a.map_or_else(|| "(none)".to_string(), render),
                b.map_or_else(|| "(none)".to_string(), render)
            )),
        })
        .collect();

    (!changes.is_empty()).then(|| changes.join(", "))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
