use crate::ast::Value;

/// Renders a value tree as JSON. Keys keep their insertion order; non-ASCII text is written as is.
pub fn to_json_string(value: &Value, pretty: bool) -> Result<String, String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| format!("JSON serialization failed: {}", e))
}

/// Converts to a `serde_json::Value` (key order is not kept by its map type).
pub fn to_json_value(value: &Value) -> Result<serde_json::Value, String> {
    serde_json::to_value(value).map_err(|e| format!("JSON serialization failed: {}", e))
}
