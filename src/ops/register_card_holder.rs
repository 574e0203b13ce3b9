//! Card holder registration.
//!
//! Name fields routinely carry Thai text; their widths are rune widths.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, RecordReader, RecordWriter};
use crate::dispatch::{Dispatched, Dispatcher, FormatSelect, RequestContext};
use crate::domain::{AppError, DomainErrorKind, ErrorTable};

pub const NAME: &str = "RegisterCardHolder";
pub const METHOD: &str = "POST";
pub const PATH: &str = "/card/holder/register";

/// ResultCode(0,2) HolderRef(2,12).
const MIN_DATA_LEN: usize = 14;

static ERRORS: ErrorTable = ErrorTable::new(&[
    ("SVC117", DomainErrorKind::InvalidIdCardNo),
    ("SVC140", DomainErrorKind::DuplicateTransaction),
]);

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id_card_no: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_no: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub result_code: String,
    pub holder_ref: String,
}

pub fn encode(req: &Request) -> String {
    RecordWriter::new()
        .str(&req.id_card_no, 13)
        .str(&req.first_name, 30)
        .str(&req.last_name, 30)
        .str(&req.mobile_no, 10)
        .finish()
}

pub fn decode(raw: &str) -> Result<Response, DecodeError> {
    let r = RecordReader::strip_header(raw, MIN_DATA_LEN)?;
    Ok(Response {
        result_code: r.read_str(0, 2),
        holder_ref: r.read_str(2, 12),
    })
}

pub async fn call(
    dispatcher: Arc<Dispatcher>,
    ctx: RequestContext,
    req: Request,
) -> Result<Dispatched<Response>, AppError> {
    let body = encode(&req);
    dispatcher
        .dispatch(&ctx, NAME, FormatSelect::Primary, body, decode, |c, m| {
            ERRORS.translate(c, m)
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::HEADER_LEN;

    #[test]
    fn thai_names_pad_to_rune_width() {
        let body = encode(&Request {
            id_card_no: "1234567890123".to_string(),
            first_name: "สมชาย".to_string(),
            last_name: "ใจดี".to_string(),
            mobile_no: "0812345678".to_string(),
        });
        assert_eq!(body.chars().count(), 13 + 30 + 30 + 10);
    }

    #[test]
    fn decode_ack() {
        let raw = format!("{}00HLD000000042", " ".repeat(HEADER_LEN));
        let resp = decode(&raw).unwrap();
        assert_eq!(resp.result_code, "00");
        assert_eq!(resp.holder_ref, "HLD000000042");
    }
}
