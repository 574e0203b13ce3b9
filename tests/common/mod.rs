//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock System I backend that answers every connection with the
/// same fixed-width response. Returns the bound port.
#[allow(dead_code)]
pub async fn start_mock_system_i(response: String) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let response = response.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let _ = socket.read_to_end(&mut buf).await;
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    port
}

/// A 123-byte transport header with an optional error code and message in
/// the 67..73 / 73..123 regions.
pub fn transport_header(error_code: &str, error_message: &str) -> String {
    let mut header = " ".repeat(123);
    header.replace_range(67..67 + error_code.len(), error_code);
    header.replace_range(73..73 + error_message.len(), error_message);
    header
}

/// Spawn the gateway on an ephemeral port and return its address.
#[allow(dead_code)]
pub async fn start_gateway(config: systemi_gateway::GatewayConfig) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = systemi_gateway::HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}
