//! Fake HR API for black-box tests.
//!
//! Every request is recorded; replies are configured per path. Login replies
//! can be held back until the test releases them.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tokio::sync::Notify;

#[derive(Debug, Clone)]
pub struct Hit {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
struct Reply {
    status: StatusCode,
    body: String,
}

#[derive(Default)]
pub struct FakeApi {
    replies: Mutex<HashMap<String, Reply>>,
    hits: Mutex<Vec<Hit>>,
    hold_logins: AtomicBool,
    release: Notify,
}

impl FakeApi {
    pub fn reply_json(&self, path: &str, status: u16, body: Value) {
        self.reply_raw(path, status, &body.to_string());
    }

    pub fn reply_raw(&self, path: &str, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).expect("valid status");
        self.replies.lock().unwrap().insert(
            path.to_string(),
            Reply {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hits_on(&self, path: &str) -> Vec<Hit> {
        self.hits().into_iter().filter(|h| h.path == path).collect()
    }

    /// Make login endpoints wait for [`FakeApi::release_logins`].
    pub fn hold_logins(&self) {
        self.hold_logins.store(true, Ordering::SeqCst);
    }

    pub fn release_logins(&self) {
        self.hold_logins.store(false, Ordering::SeqCst);
        self.release.notify_waiters();
        self.release.notify_one();
    }
}

async fn handle(
    State(api): State<Arc<FakeApi>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    api.hits.lock().unwrap().push(Hit {
        method,
        path: path.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    if path.ends_with("/login") && api.hold_logins.load(Ordering::SeqCst) {
        api.release.notified().await;
    }

    let reply = api.replies.lock().unwrap().get(&path).cloned();
    match reply {
        Some(reply) => (
            reply.status,
            [(header::CONTENT_TYPE, "application/json")],
            reply.body,
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "no reply configured").into_response(),
    }
}

pub struct TestServer {
    pub base_url: String,
    pub api: Arc<FakeApi>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let api = Arc::new(FakeApi::default());
        let app = Router::new().fallback(handle).with_state(api.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            api,
            handle,
        }
    }

    /// Wait until `count` requests have reached `path`.
    pub async fn wait_for_hits(&self, path: &str, count: usize) {
        for _ in 0..200 {
            if self.api.hits_on(path).len() >= count {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("expected {count} request(s) to {path}");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Base URL of a port nothing listens on, for connection failures.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
