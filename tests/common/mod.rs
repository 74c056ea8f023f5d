//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock HTTP backend on an ephemeral port that always answers with
/// `status` and the JSON `body`.
#[allow(dead_code)]
pub async fn start_json_backend(status: u16, body: String) -> SocketAddr {
    start_programmable_backend(move || {
        let body = body.clone();
        async move { (status, body) }
    })
    .await
}

/// Start a programmable mock backend with async support.
///
/// The closure is called once per connection and decides status and body.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut request = [0u8; 4096];
                        let _ = socket.read(&mut request).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
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
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Body of a tunnel control API response with one http and one https tunnel.
#[allow(dead_code)]
pub fn tunnels_body(http_url: &str, https_url: &str) -> String {
    serde_json::json!({
        "tunnels": [
            {"name": "command_line (http)", "proto": "http", "public_url": http_url},
            {"name": "command_line", "proto": "https", "public_url": https_url}
        ],
        "uri": "/api/tunnels"
    })
    .to_string()
}
