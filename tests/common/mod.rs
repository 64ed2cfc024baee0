//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use edge_router::config::EdgeConfig;
use edge_router::http::EdgeServer;
use edge_router::lifecycle::Shutdown;

/// Start a mock renderer that answers `200` with `"<locale-header> <path>"`.
///
/// It also sets a `referrer-policy` header so tests can see the edge overwrite it.
pub async fn start_mock_renderer(addr: SocketAddr) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }

                        let head = String::from_utf8_lossy(&buf);
                        let path = head
                            .lines()
                            .next()
                            .and_then(|line| line.split_whitespace().nth(1))
                            .unwrap_or("?")
                            .to_string();
                        let locale = head
                            .lines()
                            .find_map(|line| {
                                let (name, value) = line.split_once(':')?;
                                name.eq_ignore_ascii_case("x-edge-locale")
                                    .then(|| value.trim().to_string())
                            })
                            .unwrap_or_else(|| "-".to_string());

                        let body = format!("{locale} {path}");
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nReferrer-Policy: unsafe-url\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a renderer that accepts connections and never answers.
pub async fn start_stalled_renderer(addr: SocketAddr) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(30)).await;
                drop(socket);
            });
        }
    });
}

/// Start an edge server on `addr` in front of `renderer`.
///
/// Returns the shutdown handle and the sender for config reloads.
pub async fn start_edge(
    addr: SocketAddr,
    renderer: SocketAddr,
    mut config: EdgeConfig,
) -> (Shutdown, mpsc::UnboundedSender<EdgeConfig>) {
    config.listener.bind_address = addr.to_string();
    config.upstream.address = renderer.to_string();

    let shutdown = Shutdown::new();
    let (updates_tx, updates_rx) = mpsc::unbounded_channel();
    let server = EdgeServer::new(config).unwrap();
    let listener = TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, updates_rx, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    (shutdown, updates_tx)
}

/// HTTP client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
