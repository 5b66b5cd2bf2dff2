//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Read the request head (through the blank line) from the socket.
async fn read_request_head(socket: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                head.extend_from_slice(&buf[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}

/// Start a mock upstream that answers every request with a fixed raw response.
#[allow(dead_code)]
pub async fn start_fixed_upstream(addr: SocketAddr, response: String) {
    start_programmable_upstream(addr, move |_head| {
        let response = response.clone();
        async move { response }
    })
    .await;
}

/// Start a mock upstream whose raw response is computed from the raw request
/// head, so tests can assert on exactly what the proxy sent.
pub async fn start_programmable_upstream<F, Fut>(addr: SocketAddr, f: F)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = String> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let head = read_request_head(&mut socket).await;
                        let response = f(head).await;
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Send a raw HTTP/1.1 request and collect the full response.
///
/// Unlike a real HTTP client this adds no headers of its own, so tests can
/// exercise what the proxy does when a header is genuinely absent.
#[allow(dead_code)]
pub async fn raw_request(addr: SocketAddr, request: &str) -> String {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    socket.write_all(request.as_bytes()).await.unwrap();
    let mut response = Vec::new();
    let _ = socket.read_to_end(&mut response).await;
    String::from_utf8_lossy(&response).into_owned()
}

/// Assemble a raw HTTP/1.1 response with `Connection: close` framing.
///
/// `Content-Length` reflects `body` even when `include_body` is false, which
/// is what a real origin sends for a HEAD request.
pub fn raw_response(
    status_line: &str,
    headers: &[(&str, &str)],
    body: &str,
    include_body: bool,
) -> String {
    let mut out = format!("HTTP/1.1 {}\r\n", status_line);
    for (name, value) in headers {
        out.push_str(&format!("{}: {}\r\n", name, value));
    }
    out.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    ));
    if include_body {
        out.push_str(body);
    }
    out
}
