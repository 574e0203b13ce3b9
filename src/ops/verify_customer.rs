//! Customer identity verification.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, RecordReader, RecordWriter};
use crate::dispatch::{Dispatched, Dispatcher, FormatSelect, RequestContext};
use crate::domain::{AppError, DomainErrorKind, ErrorTable};

pub const NAME: &str = "VerifyCustomer";
pub const METHOD: &str = "POST";
pub const PATH: &str = "/customer/verify";

/// VerifiedFlag(0,1) MemberNo(1,10).
const MIN_DATA_LEN: usize = 11;

static ERRORS: ErrorTable = ErrorTable::new(&[
    ("SVC117", DomainErrorKind::InvalidIdCardNo),
    ("02", DomainErrorKind::CustomerNotEligible),
]);

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id_card_no: String,
    pub birth_date: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub verified: bool,
    pub member_no: String,
}

pub fn encode(req: &Request) -> String {
    RecordWriter::new()
        .str(&req.id_card_no, 13)
        .int(req.birth_date, 8)
        .finish()
}

pub fn decode(raw: &str) -> Result<Response, DecodeError> {
    let r = RecordReader::strip_header(raw, MIN_DATA_LEN)?;
    Ok(Response {
        verified: r.read_str(0, 1) == "Y",
        member_no: r.read_str(1, 10),
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
