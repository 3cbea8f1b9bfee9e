// API client module: a small async HTTP client for the CRM REST API.
//
// Every operation follows the same two steps: read the whole body as text,
// then normalize it (see `normalize`). The HTTP status is logged but never
// decides the outcome; callers inspect the normalized payload instead.

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{AuthReply, Credentials};
use crate::normalize::{normalize, Normalize};
use crate::session::SessionToken;

const REGISTER_PATH: &str = "/api/auth/register";
const LOGIN_PATH: &str = "/api/auth/login";
const CUSTOMERS_PATH: &str = "/api/customers";

/// Client for the four CRM endpoints.
///
/// Holds the shared `reqwest` client and the base URL, nothing per call, so
/// clones can run requests concurrently. There is no timeout: a request
/// runs until it completes or the transport fails.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Config,
}

impl ApiClient {
    /// Build a client for the base URL in `config`. The URL is copied in;
    /// later changes to the environment are not seen.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Base URL every endpoint path is joined onto.
    pub fn base_url(&self) -> &str {
        &self.config.api_url
    }

    /// `POST /api/auth/register`. A truthy `userId` in the reply means the
    /// account was created.
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthReply, ApiError> {
        let request = self
            .client
            .post(self.config.endpoint(REGISTER_PATH))
            .json(credentials);
        self.execute("register", request).await
    }

    /// `POST /api/auth/login`. A `token` in the reply starts a session.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthReply, ApiError> {
        let request = self
            .client
            .post(self.config.endpoint(LOGIN_PATH))
            .json(credentials);
        self.execute("login", request).await
    }

    /// `GET /api/customers`.
    ///
    /// An empty or unreadable body yields an empty list, the same as a
    /// server that really has no customers.
    pub async fn list_customers(&self, token: &SessionToken) -> Result<Vec<Value>, ApiError> {
        let request = self
            .client
            .get(self.config.endpoint(CUSTOMERS_PATH))
            .header(AUTHORIZATION, bearer_header(token)?);
        self.execute("list_customers", request).await
    }

    /// `POST /api/customers` with `record` as the JSON body. Returns the
    /// created record, or `None` if the body was empty, unreadable or `null`.
    pub async fn add_customer<T>(
        &self,
        record: &T,
        token: &SessionToken,
    ) -> Result<Option<Value>, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let request = self
            .client
            .post(self.config.endpoint(CUSTOMERS_PATH))
            .header(AUTHORIZATION, bearer_header(token)?)
            .json(record);
        self.execute("add_customer", request).await
    }

    async fn execute<T: Normalize>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                ApiError::Connection {
                    url: self.config.api_url.clone(),
                    source: e,
                }
            } else {
                ApiError::Transport(e)
            }
        })?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            tracing::debug!(operation, %status, bytes = text.len(), "response received");
        } else {
            tracing::warn!(operation, %status, bytes = text.len(), "non-success status, normalizing body anyway");
        }

        Ok(normalize(operation, &text))
    }
}

fn bearer_header(token: &SessionToken) -> Result<HeaderValue, ApiError> {
    let mut value = HeaderValue::from_str(&token.bearer()).map_err(|_| ApiError::InvalidToken)?;
    value.set_sensitive(true);
    Ok(value)
}
