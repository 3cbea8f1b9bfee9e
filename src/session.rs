// Session state owned by the top-level controller.
//
// Nothing here is global: the UI holds an `Option<Session>` and passes the
// token to each authenticated call explicitly. The session lives only in
// memory and is gone when the process exits.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::models::Customer;

/// Opaque bearer credential returned by a successful login.
///
/// Forwarded byte-for-byte in `Authorization: Bearer <token>`; `Debug`
/// output never includes it.
#[derive(Debug, Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wrap a token exactly as the server returned it.
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Value of the `Authorization` header for this token.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

/// A logged-in user's token plus the dashboard's local customer list.
///
/// The list mirrors display order: a reload replaces it, an add appends.
#[derive(Debug)]
pub struct Session {
    pub token: SessionToken,
    customers: Vec<Value>,
}

impl Session {
    /// Start a session with an empty local list.
    pub fn new(token: SessionToken) -> Self {
        Self {
            token,
            customers: Vec::new(),
        }
    }

    /// Swap in a freshly loaded list.
    pub fn replace_customers(&mut self, customers: Vec<Value>) {
        self.customers = customers;
    }

    /// Append a record the server just created.
    pub fn push_customer(&mut self, customer: Value) {
        self.customers.push(customer);
    }

    /// Display views of the local list, in order.
    pub fn customer_views(&self) -> Vec<Customer> {
        self.customers.iter().map(Customer::from_value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_is_forwarded_verbatim_but_not_debug_printed() {
        let token = SessionToken::new(" eyJ.abc/+= ");
        assert_eq!(token.bearer(), "Bearer  eyJ.abc/+= ");
        assert!(!format!("{token:?}").contains("eyJ"));
    }

    #[test]
    fn local_list_replaces_then_appends() {
        let mut session = Session::new(SessionToken::new("t"));
        session.replace_customers(vec![json!({"id": 1, "name": "Ann", "email": "a@x"})]);
        session.push_customer(json!({"id": 2, "name": "Bob", "email": "b@x"}));

        let names: Vec<_> = session.customer_views().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Ann", "Bob"]);

        session.replace_customers(Vec::new());
        assert!(session.customer_views().is_empty());
    }
}
