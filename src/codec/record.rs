//! Positional field primitives.
//!
//! # Responsibilities
//! - Pad or truncate string fields to an exact rune width
//! - Zero-pad integer and scaled-decimal fields
//! - Define the shared transport header length

/// Length in bytes of the transport header that prefixes every System I
/// response. The header is ASCII-only by wire contract.
pub const HEADER_LEN: usize = 123;

/// Byte range of the backend error code inside the transport header.
pub const ERROR_CODE_RANGE: std::ops::Range<usize> = 67..73;

/// Byte range of the backend error message inside the transport header.
pub const ERROR_MESSAGE_RANGE: std::ops::Range<usize> = 73..123;

/// Fit `value` into exactly `width` runes: truncate when too long,
/// right-pad with spaces when too short.
pub fn pad_or_truncate(value: &str, width: usize) -> String {
    let mut out: String = value.chars().take(width).collect();
    let have = out.chars().count();
    for _ in have..width {
        out.push(' ');
    }
    out
}

/// Zero-pad an integer to `width` digits. A value whose decimal form is
/// wider than `width` keeps its low-order digits, so a fixed-length header
/// field can never grow past its column.
pub fn pad_int_zero(value: i64, width: usize) -> String {
    let digits = value.unsigned_abs().to_string();
    if digits.len() >= width {
        digits[digits.len() - width..].to_string()
    } else {
        format!("{}{}", "0".repeat(width - digits.len()), digits)
    }
}

/// Encode a 2-decimal amount as a zero-padded integer of
/// `int_width + 2` digits with no separator. "11.25" at int_width 8
/// becomes "0000001125".
pub fn pad_decimal2(value: f64, int_width: usize) -> String {
    let scaled = (value * 100.0).round() as i64;
    pad_int_zero(scaled, int_width + 2)
}
