//! Secret detection and redaction utilities.
//!
//! Backends use these to scrub diagnostic context maps and structured
//! key/value pairs before a line leaves the process.

use serde_json::Value;

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Checks if a key name likely refers to a secret.
///
/// Uses case-insensitive pattern matching to detect common secret-related
/// naming conventions.
///
/// # Examples
///
/// ```
/// use logbridge_shared::is_secret_key;
///
/// assert!(is_secret_key("API_KEY"));
/// assert!(is_secret_key("password"));
/// assert!(is_secret_key("sessionCookie"));
/// assert!(!is_secret_key("LOG_LEVEL"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("KEY")
        || key.contains("TOKEN")
        || key.contains("SECRET")
        || key.contains("PASSWORD")
        || key.contains("CREDENTIAL")
        || key.contains("AUTH")
        || key.contains("COOKIE")
}

/// Redacts a value if the key is likely a secret.
///
/// # Examples
///
/// ```
/// use logbridge_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("API_KEY", "sk-123"), "[REDACTED]");
/// assert_eq!(redact_if_secret("LOG_LEVEL", "debug"), "debug");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

/// Recursively replace values stored under secret-looking keys.
pub fn redact_json_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map.iter_mut() {
                if is_secret_key(key) {
                    *nested = Value::String(REDACTED.to_string());
                } else {
                    redact_json_value(nested);
                }
            }
        },
        Value::Array(items) => {
            for item in items {
                redact_json_value(item);
            }
        },
        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_common_secret_patterns() {
        assert!(is_secret_key("API_KEY"));
        assert!(is_secret_key("api_key"));
        assert!(is_secret_key("ACCESS_TOKEN"));
        assert!(is_secret_key("refresh_token"));
        assert!(is_secret_key("CLIENT_SECRET"));
        assert!(is_secret_key("DB_PASSWORD"));
        assert!(is_secret_key("credentials"));
        assert!(is_secret_key("basic_auth"));
        assert!(is_secret_key("session_cookie"));
    }

    #[test]
    fn rejects_non_secret_patterns() {
        assert!(!is_secret_key("LOG_LEVEL"));
        assert!(!is_secret_key("requestId"));
        assert!(!is_secret_key("user"));
        assert!(!is_secret_key("TIMEOUT_MS"));
    }

    #[test]
    fn redacts_secret_values() {
        assert_eq!(redact_if_secret("API_KEY", "sk-123456"), REDACTED);
        assert_eq!(redact_if_secret("password", "hunter2"), REDACTED);
        assert_eq!(redact_if_secret("PORT", "8080"), "8080");
    }

    #[test]
    fn redacts_nested_json() {
        let mut value = json!({
            "user": "alice",
            "token": "abc",
            "nested": [{ "password": "nope", "attempt": 3 }]
        });
        redact_json_value(&mut value);

        assert_eq!(value["user"], json!("alice"));
        assert_eq!(value["token"], json!(REDACTED));
        assert_eq!(value["nested"][0]["password"], json!(REDACTED));
        assert_eq!(value["nested"][0]["attempt"], json!(3));
    }
}
