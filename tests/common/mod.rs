//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use bugsnack::{ReportContext, ReportMetadata, Reporter, SharedError};

/// A request received by the mock sink.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct ReceivedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl ReceivedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Start a mock ingestion sink on a loopback port that answers every
/// request with `status` and records what it received.
#[allow(dead_code)]
pub async fn start_mock_sink(status: u16) -> (SocketAddr, Arc<Mutex<Vec<ReceivedRequest>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = received.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let log = log.clone();
                    tokio::spawn(handle_connection(socket, status, log));
                }
                Err(_) => break,
            }
        }
    });

    (addr, received)
}

/// How a raw sink behaves after writing its canned response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum AfterResponse {
    /// Close the connection.
    Close,
    /// Keep the connection open without writing anything else.
    Stall,
}

/// Start a sink that writes `response` verbatim, then closes or stalls.
///
/// Used for responses a well-behaved server never sends, such as a body
/// shorter than its declared `Content-Length`.
#[allow(dead_code)]
pub async fn start_raw_sink(
    response: &'static str,
    after: AfterResponse,
) -> (SocketAddr, Arc<Mutex<Vec<ReceivedRequest>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = received.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let log = log.clone();
            tokio::spawn(async move {
                let Some(request) = read_request(&mut socket).await else {
                    return;
                };
                log.lock().unwrap().push(request);

                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.flush().await;
                match after {
                    AfterResponse::Close => {
                        let _ = socket.shutdown().await;
                    }
                    AfterResponse::Stall => {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    }
                }
            });
        }
    });

    (addr, received)
}

#[allow(dead_code)]
async fn read_request(socket: &mut TcpStream) -> Option<ReceivedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(ReceivedRequest {
        request_line,
        headers,
        body: buf[header_end..].to_vec(),
    })
}

#[allow(dead_code)]
async fn handle_connection(
    mut socket: TcpStream,
    status: u16,
    log: Arc<Mutex<Vec<ReceivedRequest>>>,
) -> Option<()> {
    let request = read_request(&mut socket).await?;
    // Record before answering so the client never observes a response first.
    log.lock().unwrap().push(request);

    let status_text = match status {
        200 => "200 OK",
        400 => "400 Bad Request",
        401 => "401 Unauthorized",
        413 => "413 Payload Too Large",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };
    let body = if status == 200 { "OK" } else { "rejected" };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
    Some(())
}

/// Reporter that records every call.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingReporter {
    calls: Mutex<Vec<(String, Option<ReportMetadata>)>>,
}

#[allow(dead_code)]
impl RecordingReporter {
    pub fn messages(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<(String, Option<ReportMetadata>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Reporter for RecordingReporter {
    async fn report(&self, _ctx: &ReportContext, err: SharedError, metadata: Option<ReportMetadata>) {
        self.calls.lock().unwrap().push((err.to_string(), metadata));
    }
}
