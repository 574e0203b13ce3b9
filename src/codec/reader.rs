//! Fixed-offset reads over a decoded response body.
//!
//! # Responsibilities
//! - Strip the 123-byte transport header off a raw response
//! - Read trimmed strings, zero-padded ints and ÷100 decimals at fixed
//!   rune offsets
//! - Slice repeating-group elements, stopping at what actually fits
//!
//! # Design Decisions
//! - Reads clamp to the available runes instead of indexing out of range;
//!   a short field reads as empty / zero, a short group reads fewer
//!   elements than declared. Malformed backend data must never panic.
//! - Numeric reads default to 0 on empty or unparsable input. The wire
//!   format has no way to distinguish "absent" from "zero".

use thiserror::Error;

use super::record::HEADER_LEN;

/// Errors raised while decoding a fixed-width response body.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Raw response does not even cover the transport header.
    #[error("response too short: {actual} bytes, header needs {expected}")]
    MissingHeader { expected: usize, actual: usize },

    /// Body after the header is shorter than the operation's minimum.
    #[error("body too short: {actual} runes, operation needs {expected}")]
    ShortBody { expected: usize, actual: usize },

    /// Response carries a format tag no variant of this operation knows.
    #[error("unknown response format tag {tag:?}")]
    UnknownFormat { tag: String },
}

/// Reader over the rune buffer of one header-stripped response body.
#[derive(Debug)]
pub struct RecordReader {
    runes: Vec<char>,
}

impl RecordReader {
    /// Strip the transport header from `raw` and validate the remaining
    /// body against the operation's minimum declared data length.
    ///
    /// The header is ASCII by wire contract, so the split at byte 123 is
    /// safe; everything after it is re-indexed as runes.
    pub fn strip_header(raw: &str, min_data_len: usize) -> Result<Self, DecodeError> {
        if raw.len() <= HEADER_LEN || !raw.is_char_boundary(HEADER_LEN) {
            return Err(DecodeError::MissingHeader {
                expected: HEADER_LEN,
                actual: raw.len(),
            });
        }
        let body = &raw[HEADER_LEN..];
        let runes: Vec<char> = body.chars().collect();
        if runes.len() < min_data_len {
            return Err(DecodeError::ShortBody {
                expected: min_data_len,
                actual: runes.len(),
            });
        }
        Ok(Self { runes })
    }

    /// Total rune length of the body.
    pub fn len(&self) -> usize {
        self.runes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }

    fn slice(&self, offset: usize, length: usize) -> String {
        slice_runes(&self.runes, offset, length)
    }

    /// Read `length` runes at `offset`, trimmed of surrounding whitespace.
    pub fn read_str(&self, offset: usize, length: usize) -> String {
        self.slice(offset, length).trim().to_string()
    }

    /// Read a zero-padded integer field. Empty or unparsable input is 0.
    pub fn read_int(&self, offset: usize, length: usize) -> i64 {
        parse_int(&self.slice(offset, length))
    }

    /// Read an integer field and scale it down by 100 into a 2-decimal
    /// amount.
    pub fn read_decimal2(&self, offset: usize, length: usize) -> f64 {
        self.read_int(offset, length) as f64 / 100.0
    }

    /// Slice repeating-group elements of `element_len` runes starting at
    /// `group_start`. Returns at most `declared_count` blocks, fewer when
    /// the body underruns: the bound is
    /// `min(declared_count, (len - group_start) / element_len)`.
    pub fn read_group(
        &self,
        group_start: usize,
        element_len: usize,
        declared_count: usize,
    ) -> Vec<RecordBlock<'_>> {
        if element_len == 0 || group_start >= self.runes.len() {
            return Vec::new();
        }
        let fits = (self.runes.len() - group_start) / element_len;
        let count = declared_count.min(fits);
        let mut blocks = Vec::with_capacity(count);
        for i in 0..count {
            let start = group_start + i * element_len;
            blocks.push(RecordBlock {
                runes: &self.runes[start..start + element_len],
            });
        }
        blocks
    }
}

/// One repeating-group element, already sliced out of the body.
/// Offsets here are relative to the block start.
pub struct RecordBlock<'a> {
    runes: &'a [char],
}

impl RecordBlock<'_> {
    pub fn block_str(&self, offset: usize, length: usize) -> String {
        slice_runes(self.runes, offset, length).trim().to_string()
    }

    pub fn block_int(&self, offset: usize, length: usize) -> i64 {
        parse_int(&slice_runes(self.runes, offset, length))
    }

    pub fn block_decimal2(&self, offset: usize, length: usize) -> f64 {
        self.block_int(offset, length) as f64 / 100.0
    }
}

fn slice_runes(runes: &[char], offset: usize, length: usize) -> String {
    let start = offset.min(runes.len());
    let end = offset.saturating_add(length).min(runes.len());
    runes[start..end].iter().collect()
}

fn parse_int(field: &str) -> i64 {
    field.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_header(body: &str) -> String {
        format!("{}{}", " ".repeat(HEADER_LEN), body)
    }

    #[test]
    fn strip_header_rejects_short_response() {
        let err = RecordReader::strip_header("short", 0).unwrap_err();
        assert!(matches!(err, DecodeError::MissingHeader { actual: 5, .. }));
    }

    #[test]
    fn strip_header_enforces_min_data_len() {
        let raw = with_header("ABCDE");
        let err = RecordReader::strip_header(&raw, 10).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::ShortBody {
                expected: 10,
                actual: 5
            }
        ));
    }

    #[test]
    fn scalar_reads_trim_and_default() {
        let raw = with_header("AB  0001234000000567800XYZ");
        let r = RecordReader::strip_header(&raw, 10).unwrap();
        assert_eq!(r.read_str(0, 4), "AB");
        assert_eq!(r.read_int(4, 7), 1234);
        assert_eq!(r.read_decimal2(11, 10), 56.78);
        // Unparsable and out-of-range reads never error.
        assert_eq!(r.read_int(23, 3), 0);
        assert_eq!(r.read_int(500, 4), 0);
        assert_eq!(r.read_str(500, 4), "");
    }

    #[test]
    fn thai_body_indexes_by_rune() {
        let raw = with_header("สมชาย   X");
        let r = RecordReader::strip_header(&raw, 5).unwrap();
        assert_eq!(r.read_str(0, 8), "สมชาย");
        assert_eq!(r.read_str(8, 1), "X");
    }

    #[test]
    fn group_truncates_to_what_fits() {
        // Declared 5 elements of width 10, only 2 present plus a stub.
        let body = format!("05{}{}{}", "A".repeat(10), "B".repeat(10), "CCC");
        let r = RecordReader::strip_header(&with_header(&body), 2).unwrap();
        let declared = r.read_int(0, 2) as usize;
        assert_eq!(declared, 5);
        let blocks = r.read_group(2, 10, declared);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].block_str(0, 10), "AAAAAAAAAA");
        assert_eq!(blocks[1].block_str(0, 10), "BBBBBBBBBB");
    }

    #[test]
    fn group_start_past_end_is_empty() {
        let r = RecordReader::strip_header(&with_header("AB"), 1).unwrap();
        assert!(r.read_group(50, 10, 3).is_empty());
    }

    #[test]
    fn block_decimal2_scales() {
        let body = "0000001234";
        let r = RecordReader::strip_header(&with_header(body), 10).unwrap();
        let blocks = r.read_group(0, 10, 1);
        assert_eq!(blocks[0].block_decimal2(0, 10), 12.34);
    }
}
