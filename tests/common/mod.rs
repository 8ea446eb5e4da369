//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::ServiceExt;

use travel_proxy::archive::{ArchiveError, Archiver, SnapshotKind};
use travel_proxy::config::AppConfig;
use travel_proxy::http::AppState;

/// A mock third-party API bound to an ephemeral port.
pub struct MockUpstream {
    pub addr: SocketAddr,
    calls: Arc<AtomicUsize>,
    request_lines: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    pub fn base_url(&self, prefix: &str) -> String {
        format!("http://{}{}", self.addr, prefix)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Request lines received so far, e.g. `GET /v1/flights?... HTTP/1.1`.
    pub fn request_lines(&self) -> Vec<String> {
        self.request_lines.lock().unwrap().clone()
    }
}

/// Start a programmable mock upstream; `f` returns status and JSON body.
pub async fn start_mock_upstream<F, Fut>(f: F) -> MockUpstream
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let request_lines = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let (c, lines) = (calls.clone(), request_lines.clone());
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let c = c.clone();
                    let lines = lines.clone();
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        c.fetch_add(1, Ordering::SeqCst);
                        if let Some(line) = head.lines().next() {
                            lines.lock().unwrap().push(line.to_string());
                        }

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            401 => "401 Unauthorized",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockUpstream {
        addr,
        calls,
        request_lines,
    }
}

/// Mock upstream that always answers with the same status and body.
pub async fn start_fixed_upstream(status: u16, body: &'static str) -> MockUpstream {
    start_mock_upstream(move || async move { (status, body.to_string()) }).await
}

/// Mock upstream that stalls longer than any test timeout.
pub async fn start_stalled_upstream(delay: Duration) -> MockUpstream {
    start_mock_upstream(move || async move {
        tokio::time::sleep(delay).await;
        (200, "{}".to_string())
    })
    .await
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") && buf.len() < 16 * 1024 {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// In-memory archiver returning fixed bytes.
#[derive(Default)]
pub struct MemoryArchiver {
    pub requested: Mutex<Vec<SnapshotKind>>,
}

/// Gzip magic followed by filler; handlers never inspect the payload.
pub const FAKE_ARCHIVE: &[u8] = &[0x1f, 0x8b, 0x08, 0x00, 0x01, 0x02, 0x03, 0x04];

#[async_trait]
impl Archiver for MemoryArchiver {
    async fn archive(&self, kind: SnapshotKind) -> Result<Bytes, ArchiveError> {
        self.requested.lock().unwrap().push(kind);
        Ok(Bytes::from_static(FAKE_ARCHIVE))
    }
}

/// Archiver whose every run fails like a broken build.
pub struct FailingArchiver;

#[async_trait]
impl Archiver for FailingArchiver {
    async fn archive(&self, _kind: SnapshotKind) -> Result<Bytes, ArchiveError> {
        Err(ArchiveError::CommandFailed {
            step: "build",
            status: "exit status: 1".into(),
            stderr: "expo: command not found".into(),
        })
    }
}

/// Default state with the in-memory archiver swapped in.
pub fn test_state(config: &AppConfig) -> AppState {
    AppState::from_config(config)
        .unwrap()
        .with_archiver(Arc::new(MemoryArchiver::default()))
}

/// Send one request through a router.
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
