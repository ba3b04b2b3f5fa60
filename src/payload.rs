//! Normalized access to loosely-typed request bodies.
//!
//! Clients send JSON whose scalar fields may arrive as numbers or numeric
//! strings interchangeably. Handlers take the body as a raw
//! `serde_json::Value` and go through these helpers, so every field gets the
//! same coercion and the validation errors stay uniform.

use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Field value as a string, if present and a string. `null` counts as absent.
pub fn opt_str(body: &Value, key: &str) -> Option<String> {
    match body.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Field value as an integer, accepting JSON numbers and numeric strings.
pub fn opt_i32(body: &Value, key: &str) -> AppResult<Option<i32>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => Ok(Some(coerce_i32(v, key)?)),
    }
}

/// Field value as a list of integer ids, accepting numbers and numeric strings.
pub fn opt_id_list(body: &Value, key: &str) -> AppResult<Option<Vec<i32>>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| coerce_i32(v, key))
            .collect::<AppResult<Vec<_>>>()
            .map(Some),
        Some(_) => Err(AppError::Validation(format!(
            "{} must be a list of integer ids",
            key
        ))),
    }
}

fn coerce_i32(v: &Value, key: &str) -> AppResult<i32> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| AppError::Validation(format!("{} must be an integer", key))),
        Value::String(s) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::Validation(format!("{} must be an integer, got '{}'", key, s))),
        _ => Err(AppError::Validation(format!("{} must be an integer", key))),
    }
}

/// Names of required fields absent from the body, in declaration order.
/// An explicit `null` counts as present here so per-field validation can
/// report it with a more specific message.
pub fn missing_fields<'a>(body: &Value, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .filter(|key| body.get(**key).is_none())
        .copied()
        .collect()
}

/// Error for missing required fields, e.g.
/// "edition and publication_year fields are missing."
pub fn missing_fields_error(missing: &[&str]) -> AppError {
    let noun = if missing.len() == 1 {
        "field is"
    } else {
        "fields are"
    };
    AppError::Validation(format!("{} {} missing.", missing.join(" and "), noun))
}

/// A name is usable only when it has non-whitespace content.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_and_numbers_coerce_to_integers() {
        let body = json!({"publication_year": "1954", "other": 2002});
        assert_eq!(opt_i32(&body, "publication_year").unwrap(), Some(1954));
        assert_eq!(opt_i32(&body, "other").unwrap(), Some(2002));
        assert_eq!(opt_i32(&body, "absent").unwrap(), None);
    }

    #[test]
    fn bad_integer_is_a_validation_error() {
        let body = json!({"publication_year": "next year"});
        assert!(matches!(
            opt_i32(&body, "publication_year"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn id_lists_accept_mixed_representations() {
        let body = json!({"authors": [1, "2", 3]});
        assert_eq!(opt_id_list(&body, "authors").unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn null_is_present_for_missing_check_but_absent_for_access() {
        let body = json!({"name": null});
        assert_eq!(opt_str(&body, "name"), None);
        assert!(missing_fields(&body, &["name"]).is_empty());
        assert_eq!(missing_fields(&json!({}), &["name"]), vec!["name"]);
    }

    #[test]
    fn missing_fields_message_uses_singular_and_plural() {
        let body = json!({"name": "The Hobbit"});
        let missing = missing_fields(&body, &["name", "edition", "publication_year"]);
        assert_eq!(missing, vec!["edition", "publication_year"]);
        assert_eq!(
            missing_fields_error(&missing).to_string(),
            "Validation error: edition and publication_year fields are missing."
        );
        assert_eq!(
            missing_fields_error(&["edition"]).to_string(),
            "Validation error: edition field is missing."
        );
    }

    #[test]
    fn blank_detection_trims_whitespace() {
        assert!(is_blank("   "));
        assert!(is_blank(""));
        assert!(!is_blank(" J. R. R. Tolkien "));
    }
}
