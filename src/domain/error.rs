//! Error types for the gateway.
//!
//! # Responsibilities
//! - Define the DomainError payload returned to clients
//! - Define the AppError taxonomy for infrastructure failures
//! - Classify low-level TCP client errors by embedded code

use serde::Serialize;
use thiserror::Error;

use crate::codec::DecodeError;

/// A translated, user-facing backend business error. Serialized inside the
/// 200-OK JSON body; `code`/`message` carry the raw backend values for
/// traceability, `error_code`/`error_message` the translated category.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomainError {
    pub error_code: String,
    pub error_message: String,
    pub code: String,
    pub message: String,
    #[serde(skip)]
    pub status_code: u16,
}

/// Translated categories for backend business errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainErrorKind {
    InvalidIdCardNo,
    InvalidUserRef,
    InvalidAgreementNo,
    InvalidCardNo,
    DataNotFound,
    DuplicateTransaction,
    CustomerNotEligible,
    ConsentAlreadyGiven,
    AccountClosed,
    UnexpectedSystem,
}

impl DomainErrorKind {
    /// Gateway-level error code for this category.
    pub fn error_code(self) -> &'static str {
        match self {
            Self::InvalidIdCardNo => "SI4001",
            Self::InvalidUserRef => "SI4002",
            Self::InvalidAgreementNo => "SI4003",
            Self::InvalidCardNo => "SI4004",
            Self::DataNotFound => "SI4040",
            Self::DuplicateTransaction => "SI4091",
            Self::CustomerNotEligible => "SI4030",
            Self::ConsentAlreadyGiven => "SI4092",
            Self::AccountClosed => "SI4031",
            Self::UnexpectedSystem => "SI5000",
        }
    }

    pub fn error_message(self) -> &'static str {
        match self {
            Self::InvalidIdCardNo => "Invalid ID card number",
            Self::InvalidUserRef => "User reference or AEON ID invalid",
            Self::InvalidAgreementNo => "Invalid agreement number",
            Self::InvalidCardNo => "Invalid card number",
            Self::DataNotFound => "Data not found",
            Self::DuplicateTransaction => "Duplicate transaction",
            Self::CustomerNotEligible => "Customer not eligible",
            Self::ConsentAlreadyGiven => "Consent already recorded",
            Self::AccountClosed => "Account closed",
            Self::UnexpectedSystem => "Unexpected system error",
        }
    }

    /// Build the client-facing payload, preserving the raw backend
    /// code and message.
    pub fn into_domain_error(self, backend_code: &str, backend_message: &str) -> DomainError {
        DomainError {
            error_code: self.error_code().to_string(),
            error_message: self.error_message().to_string(),
            code: backend_code.to_string(),
            message: backend_message.to_string(),
            status_code: 200,
        }
    }
}

/// Classification of a failed TCP round trip, derived from codes the
/// low-level client embeds in its error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Connect or read deadline exceeded ("ER040" / "ER060").
    Timeout,
    /// Client-internal failure ("ER099").
    Internal,
    /// Any other I/O failure.
    Other,
}

impl TransportKind {
    /// Classify a raw client error string by embedded code substring.
    pub fn classify(error_text: &str) -> Self {
        if error_text.contains("ER040") || error_text.contains("ER060") {
            Self::Timeout
        } else if error_text.contains("ER099") {
            Self::Internal
        } else {
            Self::Other
        }
    }

    pub fn status_code(self) -> u16 {
        match self {
            Self::Timeout => 504,
            Self::Internal => 500,
            Self::Other => 400,
        }
    }
}

/// Infrastructure failures. Unlike DomainError these may change the HTTP
/// status of the response.
#[derive(Debug, Error)]
pub enum AppError {
    /// No route configured for this method and path. Misconfiguration,
    /// not client fault.
    #[error("no route configured for {0}")]
    RouteNotFound(String),

    /// The named destination is absent from configuration.
    #[error("destination {0} not configured")]
    DestinationNotFound(String),

    /// The destination exists but is not a TCP destination.
    #[error("destination {0} is not tcp")]
    DestinationNotTcp(String),

    /// The destination has no ports for this operation.
    #[error("destination {destination} has no ports for operation {operation}")]
    EmptyPortPool {
        destination: String,
        operation: String,
    },

    /// The TCP round trip failed before any backend response existed.
    #[error("transport failure ({kind:?}): {detail}")]
    Transport { kind: TransportKind, detail: String },

    /// The backend body could not be decoded and the strict policy is in
    /// force.
    #[error("decode failure: {0}")]
    Decode(#[from] DecodeError),

    /// The audit sink failed to produce a record. Logging is a delivery
    /// precondition, so this always escalates.
    #[error("audit sink failure: {0}")]
    AuditSink(String),
}

impl AppError {
    /// HTTP status this failure surfaces as.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::RouteNotFound(_)
            | Self::DestinationNotFound(_)
            | Self::DestinationNotTcp(_)
            | Self::EmptyPortPool { .. } => 500,
            Self::Transport { kind, .. } => kind.status_code(),
            Self::Decode(_) => 500,
            Self::AuditSink(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_classification_by_substring() {
        assert_eq!(
            TransportKind::classify("connect failed ER040 deadline"),
            TransportKind::Timeout
        );
        assert_eq!(
            TransportKind::classify("read ER060 timed out"),
            TransportKind::Timeout
        );
        assert_eq!(
            TransportKind::classify("ER099 internal"),
            TransportKind::Internal
        );
        assert_eq!(
            TransportKind::classify("connection refused"),
            TransportKind::Other
        );
    }

    #[test]
    fn transport_status_codes() {
        assert_eq!(TransportKind::Timeout.status_code(), 504);
        assert_eq!(TransportKind::Internal.status_code(), 500);
        assert_eq!(TransportKind::Other.status_code(), 400);
    }

    #[test]
    fn domain_error_preserves_backend_code() {
        let err = DomainErrorKind::InvalidIdCardNo.into_domain_error("SVC117", "BAD ID");
        assert_eq!(err.code, "SVC117");
        assert_eq!(err.message, "BAD ID");
        assert_eq!(err.error_code, "SI4001");
    }
}
