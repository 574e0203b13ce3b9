//! ELK-style audit logging.
//!
//! # Data Flow
//! ```text
//! per HTTP request:   record.rs MainRecord  ┐
//! per TCP call:       record.rs LineRecord  ├→ sink.rs → daily flat file
//! ```
//!
//! # Design Decisions
//! - Audit records are a compliance artifact, separate from tracing
//!   diagnostics; both exist side by side.
//! - A sink write failure escalates to HTTP 500 regardless of the
//!   operation outcome: in this system logging is a precondition for
//!   delivering the response.
//! - One file per day, append-only; the writer rolls the handle when the
//!   date changes.

pub mod record;
pub mod sink;

pub use record::{LineRecord, MainRecord};
pub use sink::{AuditError, AuditSink};
