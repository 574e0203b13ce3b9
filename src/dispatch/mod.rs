//! Request dispatch and wire framing.
//!
//! # Data Flow
//! ```text
//! encoded body + request context
//!     → engine.rs (route lookup → destination → random port)
//!     → header.rs (system/service/format/request-id/length framing)
//!     → net client (TCP round trip)
//!     → transport classification / header error code / body decode
//!     → Dispatched result + one audit "line" record
//! ```
//!
//! # Design Decisions
//! - One generic engine parameterized by the per-operation encoder output,
//!   decoder and error table. Operations register data, not plumbing.
//! - Missing route/destination/port pool is a misconfiguration, never a
//!   client fault: fatal service error, no retry.
//! - A non-blank error code at header bytes 67..73 short-circuits straight
//!   to business-error translation; the body is never decoded.

pub mod engine;
pub mod header;

pub use engine::{Dispatched, Dispatcher, RequestContext};
pub use header::{build_header, FormatSelect};
