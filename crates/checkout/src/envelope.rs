//! The checkout backend's response envelope.
//!
//! The backend does not return bare JSON: every payload is wrapped in one
//! extra character on each side (parentheses in practice). This is the only
//! place that knows about it.

use serde_json::Value;

/// Strip the envelope from a raw response body and parse the JSON inside.
///
/// Returns `Ok(None)` when there is no body or it is too short to hold an
/// envelope.
///
/// # Errors
///
/// Returns an error if the text between the wrapper characters is not valid
/// JSON.
pub fn unwrap_envelope(raw: Option<&str>) -> Result<Option<Value>, serde_json::Error> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let mut chars = raw.chars();
    if chars.next().is_none() || chars.next_back().is_none() {
        return Ok(None);
    }

    serde_json::from_str(chars.as_str()).map(Some)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_no_data() {
        assert!(unwrap_envelope(None).unwrap().is_none());
        assert!(unwrap_envelope(Some("")).unwrap().is_none());
        assert!(unwrap_envelope(Some("a")).unwrap().is_none());
    }

    #[test]
    fn test_parenthesis_wrapped_object() {
        let value = unwrap_envelope(Some(r#"({"token":"abc"})"#)).unwrap();
        assert_eq!(value, Some(json!({"token": "abc"})));
    }

    #[test]
    fn test_strips_exactly_one_char_each_side() {
        let value = unwrap_envelope(Some("((1))")).unwrap_err();
        assert!(value.is_syntax());

        let value = unwrap_envelope(Some("x[1,2]y")).unwrap();
        assert_eq!(value, Some(json!([1, 2])));
    }

    #[test]
    fn test_multibyte_wrapper() {
        let value = unwrap_envelope(Some("«true»")).unwrap();
        assert_eq!(value, Some(json!(true)));
    }

    #[test]
    fn test_empty_envelope_is_malformed() {
        assert!(unwrap_envelope(Some("()")).is_err());
    }

    #[test]
    fn test_unwrapped_json_is_malformed() {
        assert!(unwrap_envelope(Some(r#"{"token":"abc"}"#)).is_err());
    }
}
