//! Dealer agreement inquiry.
//!
//! Request body (46 runes):
//! `AgentCode(8) MarketingCode(10) TransactionDateFrom(8) TransactionDateTo(8) AgreementNo(12)`

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, RecordReader, RecordWriter};
use crate::dispatch::{Dispatched, Dispatcher, FormatSelect, RequestContext};
use crate::domain::{AppError, DomainErrorKind, ErrorTable};

pub const NAME: &str = "GetDealerAgreement";
pub const METHOD: &str = "POST";
pub const PATH: &str = "/dealer/agreement";

/// Scalar region: AgreementNo(0,12) Status(12,2) ApprovedDate(14,8)
/// TotalAmount(22,10) TotalRecord(32,3); agreement blocks start at 35.
const MIN_DATA_LEN: usize = 35;
const GROUP_START: usize = 35;
const ELEMENT_LEN: usize = 30;

static ERRORS: ErrorTable = ErrorTable::new(&[
    ("SVC101", DomainErrorKind::InvalidAgreementNo),
    ("SVC105", DomainErrorKind::DataNotFound),
    ("01", DomainErrorKind::DataNotFound),
]);

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub agent_code: String,
    pub marketing_code: String,
    pub transaction_date_from: i64,
    pub transaction_date_to: i64,
    pub agreement_no: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub agreement_no: String,
    pub agreement_status: String,
    pub approved_date: i64,
    pub total_amount: f64,
    pub agreements: Vec<AgreementItem>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgreementItem {
    pub agreement_no: String,
    pub transaction_date: i64,
    pub amount: f64,
}

pub fn encode(req: &Request) -> String {
    RecordWriter::new()
        .str(&req.agent_code, 8)
        .str(&req.marketing_code, 10)
        .int(req.transaction_date_from, 8)
        .int(req.transaction_date_to, 8)
        .str(&req.agreement_no, 12)
        .finish()
}

pub fn decode(raw: &str) -> Result<Response, DecodeError> {
    let r = RecordReader::strip_header(raw, MIN_DATA_LEN)?;
    let total_record = r.read_int(32, 3) as usize;
    let agreements = r
        .read_group(GROUP_START, ELEMENT_LEN, total_record)
        .iter()
        .map(|b| AgreementItem {
            agreement_no: b.block_str(0, 12),
            transaction_date: b.block_int(12, 8),
            amount: b.block_decimal2(20, 10),
        })
        .collect();
    Ok(Response {
        agreement_no: r.read_str(0, 12),
        agreement_status: r.read_str(12, 2),
        approved_date: r.read_int(14, 8),
        total_amount: r.read_decimal2(22, 10),
        agreements,
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
