//! Throwaway HTTP origins for tests.
//!
//! Each origin listens on `127.0.0.1:0`, replies to every connection with a
//! canned byte sequence (or nothing at all), and keeps the socket open until
//! the client hangs up, the way a live stream would.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A local origin server.
pub struct TestOrigin {
    base_url: String,
    connections: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestOrigin {
    /// Replies to every request with `response` (status line, headers, body).
    pub async fn respond_with(response: Vec<u8>) -> Self {
        Self::spawn(Some(Arc::new(response))).await
    }

    /// Accepts connections but never writes a byte.
    pub async fn silent() -> Self {
        Self::spawn(None).await
    }

    async fn spawn(response: Option<Arc<Vec<u8>>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        let closed = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let conn_count = Arc::clone(&connections);
        let closed_count = Arc::clone(&closed);
        let request_log = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                conn_count.fetch_add(1, Ordering::SeqCst);
                let response = response.clone();
                let request_log = Arc::clone(&request_log);
                let closed_count = Arc::clone(&closed_count);
                tokio::spawn(async move {
                    handle_connection(socket, response, request_log).await;
                    closed_count.fetch_add(1, Ordering::SeqCst);
                });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            connections,
            closed,
            requests,
        }
    }

    /// URL for `path` on this origin.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Number of TCP connections accepted so far.
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Number of connections the client has hung up.
    pub fn closed_connections(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Waits until `count` connections have been closed by the client.
    pub async fn wait_for_closed(&self, count: usize) {
        while self.closed_connections() < count {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }

    /// Raw request heads received so far (lowercased).
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

async fn handle_connection(
    mut socket: TcpStream,
    response: Option<Arc<Vec<u8>>>,
    request_log: Arc<Mutex<Vec<String>>>,
) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    request_log
        .lock()
        .push(String::from_utf8_lossy(&head).to_lowercase());

    if let Some(response) = response {
        if socket.write_all(&response).await.is_err() {
            return;
        }
    }

    // Hold the connection until the client goes away
    loop {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
    }
}

/// Builds an ICY stream response: `metaint` audio bytes, one metadata block
/// carrying `stream_title`, then `trailing` more audio bytes.
///
/// The body has no length, as with a live stream.
pub fn icy_stream_response(metaint: usize, stream_title: &str, trailing: usize) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: audio/mpeg\r\nicy-name: Test FM\r\nicy-metaint: {}\r\n\r\n",
        metaint
    )
    .into_bytes();

    response.extend(std::iter::repeat(0xFFu8).take(metaint));
    response.extend(metadata_block(stream_title));
    response.extend(std::iter::repeat(0xFFu8).take(trailing));
    response
}

/// Formats one ICY metadata block: a length byte counting 16-byte units,
/// then the zero-padded text.
pub fn metadata_block(stream_title: &str) -> Vec<u8> {
    let text = format!("StreamTitle='{}';", stream_title);
    let blocks = text.len().div_ceil(16);
    let mut block = Vec::with_capacity(blocks * 16 + 1);
    block.push(blocks as u8);
    block.extend_from_slice(text.as_bytes());
    block.resize(blocks * 16 + 1, 0);
    block
}

/// Builds an ICY stream response from `metaint` and a ready-made body.
pub fn icy_response_with_body(metaint: usize, body: &[u8]) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: audio/mpeg\r\nicy-metaint: {}\r\n\r\n",
        metaint
    )
    .into_bytes();
    response.extend_from_slice(body);
    response
}

/// Builds a plain audio response without `icy-metaint`.
pub fn plain_stream_response() -> Vec<u8> {
    let mut response =
        b"HTTP/1.1 200 OK\r\nContent-Type: audio/mpeg\r\n\r\n".to_vec();
    response.extend(std::iter::repeat(0xFFu8).take(4096));
    response
}

/// Builds a complete JSON response with a fixed length.
pub fn json_response(status: u16, body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        status,
        body.len(),
        body
    )
    .into_bytes()
}

/// HTTP client for tests: ignores proxy settings from the environment.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
