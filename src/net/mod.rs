//! Downstream TCP transport.
//!
//! # Data Flow
//! ```text
//! encoded header + body
//!     → client.rs (connect, write, read to EOF)
//!     → raw fixed-width response string
//! ```
//!
//! # Design Decisions
//! - One connection per call, torn down afterwards. No pooling, no retry;
//!   a bad port is only caught by the resulting I/O error.
//! - Connect and read deadlines belong to the client, configured from the
//!   timeouts section. Dispatch never manages them.
//! - Client errors embed the internal codes (ER040/ER060/ER099) that the
//!   dispatch layer classifies by substring.

pub mod client;

pub use client::{ClientError, TcpClient};
