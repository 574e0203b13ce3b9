//! Fixed-width request body assembly.
//!
//! # Responsibilities
//! - Concatenate padded/truncated fields in declared column order
//! - Emit repeating blocks for list fields
//!
//! # Design Decisions
//! - Encoding is infallible: padding and truncation always produce the
//!   declared width, so encoders return `String`, not `Result`.
//! - The writer does not re-validate list counts; the service layer has
//!   already checked that count fields match list lengths.

use super::record::{pad_decimal2, pad_int_zero, pad_or_truncate};

/// Builder that accumulates positional fields into one record string.
#[derive(Default)]
pub struct RecordWriter {
    out: String,
}

impl RecordWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string field, space-padded or truncated to `width` runes.
    pub fn str(mut self, value: &str, width: usize) -> Self {
        self.out.push_str(&pad_or_truncate(value, width));
        self
    }

    /// Append a zero-padded integer field.
    pub fn int(mut self, value: i64, width: usize) -> Self {
        self.out.push_str(&pad_int_zero(value, width));
        self
    }

    /// Append a 2-decimal amount as an `int_width + 2` digit field.
    pub fn decimal2(mut self, value: f64, int_width: usize) -> Self {
        self.out.push_str(&pad_decimal2(value, int_width));
        self
    }

    /// Append one encoded block per list element.
    pub fn blocks<T>(mut self, items: &[T], encode: impl Fn(&T) -> String) -> Self {
        for item in items {
            self.out.push_str(&encode(item));
        }
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}
