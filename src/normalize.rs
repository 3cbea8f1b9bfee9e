// Response body normalization.
//
// Every operation reads the whole body as text and only then tries JSON.
// An empty body or one that is not JSON (an HTML error page, a truncated
// payload) is swapped for a fixed fallback value, so callers always get a
// value of the shape they asked for.

use serde_json::{json, Value};

pub const NO_RESPONSE_MESSAGE: &str = "No response from server";
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid server response";

/// What a raw body turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Zero-length body.
    Empty,
    /// Non-empty but not valid JSON.
    Malformed,
    Json(Value),
}

impl Body {
    /// Classify a body. One leading UTF-8 byte-order mark is dropped first,
    /// so a body holding only a BOM is empty. Otherwise only a zero-length
    /// string counts as empty; whitespace is handed to the JSON parser like
    /// anything else.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        if text.is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str(text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Malformed,
        }
    }
}

/// A result type with a defined fallback for each way a body can go wrong.
pub trait Normalize: Sized {
    fn empty_body() -> Self;
    fn malformed_body() -> Self;
    fn from_json(value: Value) -> Self;
}

/// Map raw body text onto `T`, logging which path was taken.
pub fn normalize<T: Normalize>(operation: &'static str, text: &str) -> T {
    match Body::classify(text) {
        Body::Json(value) => T::from_json(value),
        Body::Empty => {
            tracing::warn!(operation, "empty response body, using fallback");
            T::empty_body()
        }
        Body::Malformed => {
            tracing::warn!(
                operation,
                bytes = text.len(),
                "response body is not JSON, using fallback"
            );
            T::malformed_body()
        }
    }
}

/// `{"message": ...}`, the shape the auth endpoints use for failures.
#[must_use]
pub fn message_object(message: &str) -> Value {
    json!({ "message": message })
}

/// Customer listings: anything but a JSON array collapses to an empty list.
impl Normalize for Vec<Value> {
    fn empty_body() -> Self {
        Vec::new()
    }

    fn malformed_body() -> Self {
        Vec::new()
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Array(items) => items,
            other => {
                match rejection_message(&other) {
                    Some(message) => tracing::warn!(
                        server_message = message,
                        "customer list request was answered with a message, the session token may be expired or rejected"
                    ),
                    None => tracing::warn!(
                        kind = json_kind(&other),
                        "expected a JSON array, using empty list"
                    ),
                }
                Vec::new()
            }
        }
    }
}

/// Created records: empty, malformed and literal `null` all become `None`.
impl Normalize for Option<Value> {
    fn empty_body() -> Self {
        None
    }

    fn malformed_body() -> Self {
        None
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Null => None,
            other => Some(other),
        }
    }
}

/// The `message` of a `{"message": ...}` reply, if that is what `value` is.
#[must_use]
pub fn rejection_message(value: &Value) -> Option<&str> {
    value.get("message").and_then(Value::as_str)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
