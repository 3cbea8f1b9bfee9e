// In-process stub of the CRM REST API.
//
// Every route answers with the same scripted status and body, and records
// what it received so tests can check headers and payloads.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri};
use axum::Router;
use crm_client::{ApiClient, Config};

#[derive(Debug, Clone)]
pub struct Seen {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Script {
    status: StatusCode,
    body: &'static str,
    seen: Arc<Mutex<Vec<Seen>>>,
}

pub struct StubServer {
    pub base_url: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl StubServer {
    /// Requests received so far, in arrival order.
    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    pub fn client(&self) -> ApiClient {
        let config = Config::new(Some(self.base_url.clone())).unwrap();
        ApiClient::new(&config).unwrap()
    }
}

pub async fn spawn(body: &'static str) -> StubServer {
    spawn_with_status(StatusCode::OK, body).await
}

pub async fn spawn_with_status(status: StatusCode, body: &'static str) -> StubServer {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let script = Script {
        status,
        body,
        seen: Arc::clone(&seen),
    };
    let router = Router::new().fallback(respond).with_state(script);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    StubServer {
        base_url: format!("http://{addr}"),
        seen,
    }
}

async fn respond(
    State(script): State<Script>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    script.seen.lock().unwrap().push(Seen {
        method,
        path: uri.path().to_string(),
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
        body,
    });
    (script.status, script.body.to_string())
}

/// A base URL nothing is listening on.
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
