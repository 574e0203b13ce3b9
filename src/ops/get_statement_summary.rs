//! Statement summary inquiry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, RecordReader, RecordWriter};
use crate::dispatch::{Dispatched, Dispatcher, FormatSelect, RequestContext};
use crate::domain::{AppError, DomainErrorKind, ErrorTable};

pub const NAME: &str = "GetStatementSummary";
pub const METHOD: &str = "POST";
pub const PATH: &str = "/statement/summary";

/// StatementDate(0,8) Opening(8,10) Closing(18,10) MinPayment(28,10)
/// DueDate(38,8).
const MIN_DATA_LEN: usize = 46;

static ERRORS: ErrorTable = ErrorTable::new(&[
    ("SVC119", DomainErrorKind::InvalidCardNo),
    ("01", DomainErrorKind::DataNotFound),
]);

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub card_no: String,
    pub statement_date: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub statement_date: i64,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub minimum_payment: f64,
    pub due_date: i64,
}

pub fn encode(req: &Request) -> String {
    RecordWriter::new()
        .str(&req.card_no, 16)
        .int(req.statement_date, 8)
        .finish()
}

pub fn decode(raw: &str) -> Result<Response, DecodeError> {
    let r = RecordReader::strip_header(raw, MIN_DATA_LEN)?;
    Ok(Response {
        statement_date: r.read_int(0, 8),
        opening_balance: r.read_decimal2(8, 10),
        closing_balance: r.read_decimal2(18, 10),
        minimum_payment: r.read_decimal2(28, 10),
        due_date: r.read_int(38, 8),
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
