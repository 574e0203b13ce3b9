//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from config
//! files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Name of the destination every operation dispatches to.
pub const SYSTEM_I_DESTINATION: &str = "systemI";

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, limits).
    pub listener: ListenerConfig,

    /// Route definitions keyed by "METHOD:PATH".
    pub routes: HashMap<String, Route>,

    /// Backend destinations keyed by name. Dispatch uses "systemI".
    pub destinations: HashMap<String, Destination>,

    /// Timeout configuration for the downstream TCP client.
    pub timeouts: TimeoutConfig,

    /// Audit log settings.
    pub audit: AuditConfig,

    /// API-key and header validation settings.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl GatewayConfig {
    /// Look up the route for an HTTP method and path.
    pub fn route(&self, method: &str, path: &str) -> Option<&Route> {
        self.routes.get(&format!("{method}:{path}"))
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout applied by the HTTP middleware, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Mainframe program identifiers for one HTTP method+path.
///
/// `format`/`system` address the primary message format; the `_v1`/`_v2`
/// fields carry alternates for operations with more than one request
/// variant (e.g. customer info 001 vs 004).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Route {
    pub system: String,
    pub service: String,
    pub format: String,
    pub format_v1: Option<String>,
    pub format_v2: Option<String>,
    pub system_v1: Option<String>,
    pub system_v2: Option<String>,

    /// Fixed request length for the header, when the operation declares a
    /// constant instead of deriving it from the encoded body.
    pub request_length: Option<usize>,
}

/// A named pool of TCP endpoints for one backend system.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Destination {
    /// Destination kind. Only "tcp" is dispatchable.
    #[serde(rename = "type")]
    pub kind: String,

    /// Backend IP address.
    pub ip: String,

    /// Port pool per operation name. One port is chosen uniformly at
    /// random per call; there is no health checking.
    #[serde(default)]
    pub ports: HashMap<String, Vec<u16>>,
}

/// Timeout configuration for the downstream TCP client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Read timeout for the response in seconds.
    pub read_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            read_secs: 30,
        }
    }
}

/// What to do when a backend body fails to decode after a clean header.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecodeLeniency {
    /// Log the failure and still return 200 with a degraded body. Matches
    /// the legacy client contract.
    #[default]
    Lenient,
    /// Treat the failure as a service error.
    Strict,
}

/// Audit log settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Directory for daily audit files.
    pub dir: String,

    /// Named policy for decode failures (see DecodeLeniency).
    pub decode_leniency: DecodeLeniency,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            dir: "./logs".to_string(),
            decode_leniency: DecodeLeniency::Lenient,
        }
    }
}

/// API-key validation settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SecurityConfig {
    /// Accepted values for the x-api-key header. Empty list disables the
    /// check (dev mode).
    pub api_keys: Vec<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
