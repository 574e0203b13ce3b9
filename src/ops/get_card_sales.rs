//! Card sales inquiry.
//!
//! Request body (33 runes):
//! `IdCardNo(13) BranchCode(4) SaleDateFrom(8) SaleDateTo(8)`

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, RecordReader, RecordWriter};
use crate::dispatch::{Dispatched, Dispatcher, FormatSelect, RequestContext};
use crate::domain::{AppError, DomainErrorKind, ErrorTable};

pub const NAME: &str = "GetCardSales";
pub const METHOD: &str = "POST";
pub const PATH: &str = "/card/sales";

/// Scalar region: TotalSales(0,12) TotalRecord(12,3); sale blocks at 15.
const MIN_DATA_LEN: usize = 15;
const GROUP_START: usize = 15;
const ELEMENT_LEN: usize = 40;

static ERRORS: ErrorTable = ErrorTable::new(&[
    ("SVC117", DomainErrorKind::InvalidIdCardNo),
    ("SVC105", DomainErrorKind::DataNotFound),
    ("02", DomainErrorKind::CustomerNotEligible),
]);

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id_card_no: String,
    pub branch_code: String,
    pub sale_date_from: i64,
    pub sale_date_to: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub total_sales: f64,
    pub sales: Vec<SaleItem>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub card_no: String,
    pub sale_date: i64,
    pub amount: f64,
    pub channel: String,
}

pub fn encode(req: &Request) -> String {
    RecordWriter::new()
        .str(&req.id_card_no, 13)
        .str(&req.branch_code, 4)
        .int(req.sale_date_from, 8)
        .int(req.sale_date_to, 8)
        .finish()
}

pub fn decode(raw: &str) -> Result<Response, DecodeError> {
    let r = RecordReader::strip_header(raw, MIN_DATA_LEN)?;
    let total_record = r.read_int(12, 3) as usize;
    let sales = r
        .read_group(GROUP_START, ELEMENT_LEN, total_record)
        .iter()
        .map(|b| SaleItem {
            card_no: b.block_str(0, 16),
            sale_date: b.block_int(16, 8),
            amount: b.block_decimal2(24, 10),
            channel: b.block_str(34, 6),
        })
        .collect();
    Ok(Response {
        total_sales: r.read_decimal2(0, 12),
        sales,
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
