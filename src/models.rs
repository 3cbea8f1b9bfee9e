// Request payloads and read views over normalized responses.
//
// The server owns these shapes; nothing here validates what comes back.
// Read views pick out the fields the frontend needs and ignore the rest.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::normalize::{message_object, Normalize, INVALID_RESPONSE_MESSAGE, NO_RESPONSE_MESSAGE};

/// Login/registration payload, sent as `{"username": .., "password": ..}`.
///
/// Built per submit and dropped once the request completes.
#[derive(Serialize, Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Both fields must be non-empty; they are otherwise sent as typed.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self, ApiError> {
        let username = username.into();
        let password = password.into();
        if username.is_empty() {
            return Err(ApiError::EmptyField("username"));
        }
        if password.is_empty() {
            return Err(ApiError::EmptyField("password"));
        }
        Ok(Self { username, password })
    }

    /// Name the user typed, for greeting them after login.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Fields collected by the "add customer" form. All four are always sent,
/// empty strings included.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Display view of a customer record. Missing or mistyped fields fall back
/// to defaults instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customer {
    pub id: Option<Value>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Customer {
    /// Read whatever fields `value` carries; anything else is defaulted.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            id: value.get("id").filter(|v| !v.is_null()).cloned(),
            name: text("name"),
            email: text("email"),
            phone: text("phone"),
            address: text("address"),
        }
    }

    /// One-line listing form, `#id name - email`. The id prefix is left
    /// out when the record has none.
    pub fn summary(&self) -> String {
        match &self.id {
            Some(Value::String(id)) => format!("#{id} {} - {}", self.name, self.email),
            Some(id) => format!("#{id} {} - {}", self.name, self.email),
            None => format!("{} - {}", self.name, self.email),
        }
    }
}

/// Normalized payload of `register` and `login`.
///
/// Success and failure share one shape at this layer: a token or user id
/// means success, a `message` usually explains a failure. The raw JSON is
/// kept intact and available through [`AuthReply::as_value`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthReply(Value);

impl AuthReply {
    /// Wrap a normalized payload as-is.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Session token from a successful login, if present and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.0
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
    }

    /// Identifier of a freshly registered user, if present and truthy.
    pub fn user_id(&self) -> Option<&Value> {
        self.0.get("userId").filter(|v| is_truthy(v))
    }

    /// The server's `message` field, when it is a string.
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// Text to show the user when the expected success field is missing.
    pub fn failure_message(&self, default: &str) -> String {
        self.message()
            .filter(|m| !m.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    /// The payload exactly as normalized.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Give up the wrapper and keep the raw payload.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl Normalize for AuthReply {
    fn empty_body() -> Self {
        Self(message_object(NO_RESPONSE_MESSAGE))
    }

    fn malformed_body() -> Self {
        Self(message_object(INVALID_RESPONSE_MESSAGE))
    }

    fn from_json(value: Value) -> Self {
        Self(value)
    }
}

// JavaScript truthiness: null, false, 0, NaN and "" are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;

    #[test]
    fn credentials_reject_empty_fields() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(ApiError::EmptyField("username"))
        ));
        assert!(matches!(
            Credentials::new("user@demo.com", ""),
            Err(ApiError::EmptyField("password"))
        ));
    }

    #[test]
    fn credentials_serialize_as_username_password() {
        let creds = Credentials::new("user@demo.com", "user123").unwrap();
        assert_eq!(
            serde_json::to_value(&creds).unwrap(),
            json!({"username": "user@demo.com", "password": "user123"})
        );
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("user@demo.com", "user123").unwrap();
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("user@demo.com"));
        assert!(!dbg.contains("user123"));
    }

    #[test]
    fn new_customer_sends_every_field() {
        let record = NewCustomer {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"name": "Jane", "email": "jane@example.com", "phone": "", "address": ""})
        );
    }

    #[test]
    fn customer_view_tolerates_odd_records() {
        let c = Customer::from_value(&json!({"id": 7, "name": "Ann", "email": 42}));
        assert_eq!(c.id, Some(json!(7)));
        assert_eq!(c.summary(), "#7 Ann - ");

        let c = Customer::from_value(&json!({"id": "c-9", "name": "Bo", "email": "bo@x.io"}));
        assert_eq!(c.summary(), "#c-9 Bo - bo@x.io");

        let c = Customer::from_value(&json!({"id": null, "name": "Cy", "email": "cy@x.io"}));
        assert_eq!(c.summary(), "Cy - cy@x.io");

        let c = Customer::from_value(&json!("not an object"));
        assert_eq!(c, Customer::default());
    }

    #[test]
    fn auth_reply_fallback_messages() {
        let empty: AuthReply = normalize("login", "");
        assert_eq!(empty.as_value(), &json!({"message": "No response from server"}));
        assert_eq!(empty.token(), None);

        let bad: AuthReply = normalize("login", "<html>Error</html>");
        assert_eq!(bad.as_value(), &json!({"message": "Invalid server response"}));
        assert_eq!(bad.failure_message("Login failed"), "Invalid server response");
    }

    #[test]
    fn auth_reply_success_fields() {
        let reply = AuthReply::new(json!({"token": "abc123"}));
        assert_eq!(reply.token(), Some("abc123"));

        let reply = AuthReply::new(json!({"userId": 12}));
        assert_eq!(reply.user_id(), Some(&json!(12)));
    }

    #[test]
    fn falsy_user_id_and_missing_message() {
        let reply = AuthReply::new(json!({"userId": 0}));
        assert_eq!(reply.user_id(), None);
        assert_eq!(reply.failure_message("Registration failed"), "Registration failed");

        let reply = AuthReply::new(json!({"userId": "", "token": ""}));
        assert_eq!(reply.user_id(), None);
        assert_eq!(reply.token(), None);
    }
}
