// In-process stand-in for the analysis backend
//
// Responses are scripted per "METHOD /path". Each request pops the next
// scripted response; the last one keeps being served once the queue is
// down to a single entry.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use session_lens::{ApiGateway, StaticToken};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Default)]
struct FakeState {
    routes: HashMap<String, VecDeque<(u16, String)>>,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method path`
    pub fn respond(&self, method: &str, path: &str, status: u16, body: impl Into<String>) {
        let mut state = self.state.lock().unwrap();
        state
            .routes
            .entry(format!("{} {}", method, path))
            .or_default()
            .push_back((status, body.into()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Bind to an ephemeral port and return the base URL
    pub async fn serve(&self) -> String {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }
}

async fn handle(
    axum::extract::State(backend): axum::extract::State<FakeBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };

    let mut state = backend.state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: body.to_vec(),
    });

    let key = format!("{} {}", method, uri.path());
    let scripted = state.routes.get_mut(&key).and_then(|queue| {
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    });

    match scripted {
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"detail":"Not Found"}"#.to_string(),
        )
            .into_response(),
    }
}

pub fn gateway(base_url: &str, token: Option<&str>) -> ApiGateway {
    let tokens = match token {
        Some(token) => StaticToken::new(token),
        None => StaticToken::anonymous(),
    };
    ApiGateway::new(base_url, Duration::from_secs(5), Arc::new(tokens)).unwrap()
}
