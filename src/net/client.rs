//! Synchronous-style request/response TCP client.
//!
//! # Responsibilities
//! - One connect/write/read round trip per call
//! - Enforce connect and read deadlines
//! - Surface failures with the internal codes dispatch classifies on

use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::TimeoutConfig;

/// Errors from one TCP round trip. The Display text carries the internal
/// codes ("ER040", "ER060", "ER099") that the dispatch layer matches on.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("ER040 connect deadline exceeded for {0}")]
    ConnectTimeout(String),

    #[error("ER060 read deadline exceeded for {0}")]
    ReadTimeout(String),

    #[error("ER099 client failure for {address}: {detail}")]
    Internal { address: String, detail: String },

    #[error("connection to {address} failed: {source}")]
    Io {
        address: String,
        source: std::io::Error,
    },
}

/// TCP client making one request/response exchange per call.
#[derive(Debug, Clone)]
pub struct TcpClient {
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl TcpClient {
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(timeouts.connect_secs),
            read_timeout: Duration::from_secs(timeouts.read_secs),
        }
    }

    /// Send `payload` to `address` and read the response until the
    /// backend closes the connection.
    pub async fn send_and_receive(
        &self,
        address: &str,
        payload: &str,
    ) -> Result<String, ClientError> {
        let mut stream = tokio::time::timeout(self.connect_timeout, TcpStream::connect(address))
            .await
            .map_err(|_| ClientError::ConnectTimeout(address.to_string()))?
            .map_err(|e| ClientError::Io {
                address: address.to_string(),
                source: e,
            })?;

        stream
            .write_all(payload.as_bytes())
            .await
            .map_err(|e| ClientError::Io {
                address: address.to_string(),
                source: e,
            })?;
        // Half-close so the backend sees EOF on its read.
        stream.shutdown().await.map_err(|e| ClientError::Io {
            address: address.to_string(),
            source: e,
        })?;

        let mut buf = Vec::new();
        tokio::time::timeout(self.read_timeout, stream.read_to_end(&mut buf))
            .await
            .map_err(|_| ClientError::ReadTimeout(address.to_string()))?
            .map_err(|e| ClientError::Io {
                address: address.to_string(),
                source: e,
            })?;

        String::from_utf8(buf).map_err(|e| ClientError::Internal {
            address: address.to_string(),
            detail: format!("response is not valid UTF-8: {e}"),
        })
    }
}
