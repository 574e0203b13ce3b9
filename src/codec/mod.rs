//! Fixed-width positional record codec.
//!
//! # Data Flow
//! ```text
//! Encode:
//!     request struct
//!         → writer.rs (pad/truncate each field in column order)
//!         → one fixed-width string (the TCP message body)
//!
//! Decode:
//!     raw TCP response
//!         → reader.rs (strip 123-byte transport header)
//!         → fixed-offset scalar reads
//!         → repeating-group loop, bounded by what actually fits
//!         → response struct
//! ```
//!
//! # Design Decisions
//! - All body indexing is rune-based, never byte-based: encoded fields may
//!   carry multi-byte Thai text, and byte slicing would split characters.
//! - The 123-byte transport header and the error-code region inside it are
//!   ASCII-stable by wire contract and are byte-sliced on purpose.
//! - Encoding is pure and infallible; every field width is a hard contract
//!   with System I, so over-length input truncates rather than errors.
//! - A short or malformed backend body degrades to a truncated list, never
//!   a panic or out-of-bounds read.

pub mod reader;
pub mod record;
pub mod writer;

pub use reader::{DecodeError, RecordBlock, RecordReader};
pub use record::{pad_decimal2, pad_int_zero, pad_or_truncate, HEADER_LEN};
pub use writer::RecordWriter;
