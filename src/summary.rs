//! Structural validation for summary artifacts.
//!
//! A summary artifact is a JSON object with five required fields: `title`
//! (string), `participants`, `key_points`, `action_items` (each an array of
//! strings) and `summary` (string). Unknown extra fields pass silently; this
//! is a permissive schema, not strict validation.

use serde_json::Value;

/// Required fields, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 5] =
    ["title", "participants", "key_points", "action_items", "summary"];

/// Validate a candidate artifact. Returns the first rule violation; checks
/// short-circuit in a fixed order so error messages are deterministic.
pub fn validate_summary(candidate: &Value) -> Result<(), String> {
    let obj = match candidate.as_object() {
        Some(obj) => obj,
        None => return Err("Expected object".to_string()),
    };

    for key in REQUIRED_FIELDS {
        if !obj.contains_key(key) {
            return Err(format!("Missing required field: {key}"));
        }
    }

    if !obj["title"].is_string() {
        return Err("title must be string".to_string());
    }
    for key in ["participants", "key_points", "action_items"] {
        let ok = obj[key]
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string));
        if !ok {
            return Err(format!("{key} must be list of strings"));
        }
    }
    if !obj["summary"].is_string() {
        return Err("summary must be string".to_string());
    }

    Ok(())
}
