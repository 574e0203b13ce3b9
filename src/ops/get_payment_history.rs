//! Payment history inquiry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, RecordReader, RecordWriter};
use crate::dispatch::{Dispatched, Dispatcher, FormatSelect, RequestContext};
use crate::domain::{AppError, DomainErrorKind, ErrorTable};

pub const NAME: &str = "GetPaymentHistory";
pub const METHOD: &str = "POST";
pub const PATH: &str = "/payment/history";

/// TotalPaid(0,12) TotalRecord(12,3); blocks at 15: PaymentDate(0,8)
/// Amount(8,10) Channel(18,6) ReceiptNo(24,6).
const MIN_DATA_LEN: usize = 15;
const GROUP_START: usize = 15;
const ELEMENT_LEN: usize = 30;

static ERRORS: ErrorTable = ErrorTable::new(&[
    ("SVC101", DomainErrorKind::InvalidAgreementNo),
    ("01", DomainErrorKind::DataNotFound),
]);

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub agreement_no: String,
    pub date_from: i64,
    pub date_to: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub total_paid: f64,
    pub payments: Vec<PaymentItem>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentItem {
    pub payment_date: i64,
    pub amount: f64,
    pub channel: String,
    pub receipt_no: String,
}

pub fn encode(req: &Request) -> String {
    RecordWriter::new()
        .str(&req.agreement_no, 12)
        .int(req.date_from, 8)
        .int(req.date_to, 8)
        .finish()
}

pub fn decode(raw: &str) -> Result<Response, DecodeError> {
    let r = RecordReader::strip_header(raw, MIN_DATA_LEN)?;
    let total = r.read_int(12, 3) as usize;
    let payments = r
        .read_group(GROUP_START, ELEMENT_LEN, total)
        .iter()
        .map(|b| PaymentItem {
            payment_date: b.block_int(0, 8),
            amount: b.block_decimal2(8, 10),
            channel: b.block_str(18, 6),
            receipt_no: b.block_str(24, 6),
        })
        .collect();
    Ok(Response {
        total_paid: r.read_decimal2(0, 12),
        payments,
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
    fn encode_width_is_28() {
        let body = encode(&Request {
            agreement_no: "AGR000000001".to_string(),
            date_from: 20230101,
            date_to: 20230630,
        });
        assert_eq!(body.chars().count(), 28);
    }

    #[test]
    fn decode_payments() {
        let item = format!("{}{}{:<6}{:<6}", "20230110", "0000125000", "ATM", "RC0001");
        let raw = format!(
            "{}{}{}{}",
            " ".repeat(HEADER_LEN),
            "000000125000",
            "001",
            item
        );
        let resp = decode(&raw).unwrap();
        assert_eq!(resp.total_paid, 1250.00);
        assert_eq!(resp.payments.len(), 1);
        assert_eq!(resp.payments[0].payment_date, 20230110);
        assert_eq!(resp.payments[0].amount, 1250.00);
        assert_eq!(resp.payments[0].receipt_no, "RC0001");
    }
}
