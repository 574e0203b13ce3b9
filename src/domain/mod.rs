//! Domain error model and backend code translation.
//!
//! # Data Flow
//! ```text
//! Raw System I response
//!     → error code at header bytes 67..73, message at 73..123
//!     → translate.rs (per-operation, format-aware lookup table)
//!     → DomainError (embedded in the 200-OK JSON body)
//!
//! Transport failure (no response at all)
//!     → error.rs (substring classification: ER040/ER060/ER099)
//!     → AppError (may surface as HTTP 504/500)
//! ```
//!
//! # Design Decisions
//! - DomainError (business) and AppError (infrastructure) are distinct
//!   types: business errors ride inside a 200 body for legacy clients,
//!   infrastructure errors change the HTTP status.
//! - Unknown backend codes fall back to a generic category but keep the
//!   raw code and message for the audit trail.

pub mod error;
pub mod translate;

pub use error::{AppError, DomainError, DomainErrorKind, TransportKind};
pub use translate::ErrorTable;
