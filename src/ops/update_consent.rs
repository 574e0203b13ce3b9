//! Consent update.
//!
//! The encoder emits a count column followed by exactly that many consent
//! blocks. The count is derived from the list itself, so the two can
//! never disagree.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, RecordReader, RecordWriter};
use crate::dispatch::{Dispatched, Dispatcher, FormatSelect, RequestContext};
use crate::domain::{AppError, DomainErrorKind, ErrorTable};

pub const NAME: &str = "UpdateConsent";
pub const METHOD: &str = "POST";
pub const PATH: &str = "/consent/update";

/// Ack body: ResultCode(0,2) UpdatedCount(2,2).
const MIN_DATA_LEN: usize = 4;

static ERRORS: ErrorTable = ErrorTable::new(&[
    ("SVC110", DomainErrorKind::InvalidUserRef),
    ("SVC130", DomainErrorKind::ConsentAlreadyGiven),
]);

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub user_ref: String,
    pub consents: Vec<ConsentUpdate>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentUpdate {
    pub consent_code: String,
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub result_code: String,
    pub updated_count: i64,
}

pub fn encode(req: &Request) -> String {
    RecordWriter::new()
        .str(&req.user_ref, 20)
        .int(req.consents.len() as i64, 2)
        .blocks(&req.consents, |c| {
            RecordWriter::new()
                .str(&c.consent_code, 8)
                .str(&c.status, 1)
                .str(&c.version, 6)
                .finish()
        })
        .finish()
}

pub fn decode(raw: &str) -> Result<Response, DecodeError> {
    let r = RecordReader::strip_header(raw, MIN_DATA_LEN)?;
    Ok(Response {
        result_code: r.read_str(0, 2),
        updated_count: r.read_int(2, 2),
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
    fn encode_emits_count_then_blocks() {
        let body = encode(&Request {
            user_ref: "USER01".to_string(),
            consents: vec![
                ConsentUpdate {
                    consent_code: "MKT_MAIL".to_string(),
                    status: "Y".to_string(),
                    version: "v2.1".to_string(),
                },
                ConsentUpdate {
                    consent_code: "MKT_SMS".to_string(),
                    status: "N".to_string(),
                    version: "v2.1".to_string(),
                },
            ],
        });
        // user_ref(20) + count(2) + 2 blocks of 15
        assert_eq!(body.chars().count(), 52);
        assert_eq!(&body[20..22], "02");
        assert_eq!(&body[22..37], "MKT_MAILYv2.1  ");
    }

    #[test]
    fn empty_list_encodes_zero_count() {
        let body = encode(&Request {
            user_ref: "USER01".to_string(),
            consents: Vec::new(),
        });
        assert_eq!(body.chars().count(), 22);
        assert!(body.ends_with("00"));
    }

    #[test]
    fn decode_ack() {
        let raw = format!("{}0002", " ".repeat(HEADER_LEN));
        let resp = decode(&raw).unwrap();
        assert_eq!(resp.result_code, "00");
        assert_eq!(resp.updated_count, 2);
    }
}
