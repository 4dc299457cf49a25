use serde_json::Value;

/// Resolves a dot-separated path inside a JSON document.
///
/// Object keys are matched literally; numeric segments index arrays. A
/// `null` leaf counts as present, only a missing key resolves to `None`.
pub fn lookup_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index)),
        _ => None,
    })
}
