//! Consent status inquiry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, RecordReader, RecordWriter};
use crate::dispatch::{Dispatched, Dispatcher, FormatSelect, RequestContext};
use crate::domain::{AppError, DomainErrorKind, ErrorTable};

pub const NAME: &str = "GetConsentList";
pub const METHOD: &str = "POST";
pub const PATH: &str = "/consent/list";

/// TotalConsent(0,2); blocks at 2: ConsentCode(0,8) Status(8,1)
/// ActionDate(9,8) Version(17,6) Channel(23,8).
const MIN_DATA_LEN: usize = 2;
const GROUP_START: usize = 2;
const ELEMENT_LEN: usize = 31;

static ERRORS: ErrorTable = ErrorTable::new(&[
    ("SVC110", DomainErrorKind::InvalidUserRef),
    ("01", DomainErrorKind::DataNotFound),
]);

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub user_ref: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub consents: Vec<ConsentItem>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsentItem {
    pub consent_code: String,
    pub status: String,
    pub action_date: i64,
    pub version: String,
    pub channel: String,
}

pub fn encode(req: &Request) -> String {
    RecordWriter::new().str(&req.user_ref, 20).finish()
}

pub fn decode(raw: &str) -> Result<Response, DecodeError> {
    let r = RecordReader::strip_header(raw, MIN_DATA_LEN)?;
    let total = r.read_int(0, 2) as usize;
    let consents = r
        .read_group(GROUP_START, ELEMENT_LEN, total)
        .iter()
        .map(|b| ConsentItem {
            consent_code: b.block_str(0, 8),
            status: b.block_str(8, 1),
            action_date: b.block_int(9, 8),
            version: b.block_str(17, 6),
            channel: b.block_str(23, 8),
        })
        .collect();
    Ok(Response { consents })
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
