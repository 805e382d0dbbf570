//! Message extraction from error response bodies.

use serde_json::Value;

/// Extract a human-readable message from an error body.
///
/// Tried in order: a string body, `message`, `error`, `details`, then the
/// `errors` array joined with `", "` (each element's `message`, or the element
/// itself). Empty results count as absent.
pub fn extract_body_message(body: &Value) -> Option<String> {
    if let Value::String(s) = body {
        return non_empty(s.clone());
    }

    let obj = body.as_object()?;

    for key in ["message", "error", "details"] {
        if let Some(text) = obj.get(key).and_then(text_of) {
            return Some(text);
        }
    }

    let errors = obj.get("errors")?.as_array()?;
    let joined = errors
        .iter()
        .map(|e| {
            e.get("message")
                .and_then(text_of)
                .or_else(|| text_of(e))
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(", ");
    non_empty(joined)
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => non_empty(s.clone()),
        other => Some(other.to_string()),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_body() {
        assert_eq!(extract_body_message(&json!("Bad input")), Some("Bad input".into()));
        assert_eq!(extract_body_message(&json!("")), None);
    }

    #[test]
    fn test_field_precedence() {
        let body = json!({ "error": "e", "message": "m", "details": "d" });
        assert_eq!(extract_body_message(&body), Some("m".into()));

        let body = json!({ "error": "e", "details": "d" });
        assert_eq!(extract_body_message(&body), Some("e".into()));

        let body = json!({ "message": "", "details": "d" });
        assert_eq!(extract_body_message(&body), Some("d".into()));
    }

    #[test]
    fn test_errors_array() {
        let body = json!({ "errors": [{ "message": "a" }, { "message": "b" }] });
        assert_eq!(extract_body_message(&body), Some("a, b".into()));

        let body = json!({ "errors": ["name too short", { "message": "limit < 0" }] });
        assert_eq!(
            extract_body_message(&body),
            Some("name too short, limit < 0".into())
        );

        assert_eq!(extract_body_message(&json!({ "errors": [] })), None);
    }

    #[test]
    fn test_nothing_to_extract() {
        assert_eq!(extract_body_message(&json!({ "status": 400 })), None);
        assert_eq!(extract_body_message(&json!(null)), None);
        assert_eq!(extract_body_message(&json!(42)), None);
    }
}
