//! Audit record shapes.
//!
//! Field names follow the downstream ELK index mappings, hence the
//! explicit renames.

use serde::Serialize;

/// One record per inbound HTTP request.
#[derive(Debug, Clone, Serialize, Default)]
pub struct MainRecord {
    #[serde(rename = "RequestID")]
    pub request_id: String,
    #[serde(rename = "Service")]
    pub service: String,
    #[serde(rename = "SourceIP")]
    pub source_ip: String,
    #[serde(rename = "UserToken")]
    pub user_token: String,
    #[serde(rename = "UserRef")]
    pub user_ref: String,
    #[serde(rename = "Request")]
    pub request: String,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "ErrorCode")]
    pub error_code: String,
    #[serde(rename = "ErrorMessage")]
    pub error_message: String,
    #[serde(rename = "ElapsedMs")]
    pub elapsed_ms: u128,
}

/// One record per downstream TCP call.
#[derive(Debug, Clone, Serialize, Default)]
pub struct LineRecord {
    #[serde(rename = "RequestID")]
    pub request_id: String,
    #[serde(rename = "Service")]
    pub service: String,
    #[serde(rename = "SourceIP")]
    pub source_ip: String,
    #[serde(rename = "DestIP")]
    pub dest_ip: String,
    #[serde(rename = "Request")]
    pub request: String,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "ErrorCode")]
    pub error_code: String,
    #[serde(rename = "ErrorMessage")]
    pub error_message: String,
    #[serde(rename = "ElapsedMs")]
    pub elapsed_ms: u128,
}

impl MainRecord {
    pub fn has_error(&self) -> bool {
        !self.error_code.is_empty()
    }
}

impl LineRecord {
    pub fn has_error(&self) -> bool {
        !self.error_code.is_empty()
    }
}
