//! Dashboard summary.
//!
//! Two response layouts exist. Clients still on the old mobile app set
//! `flagOldFormatReq`, which selects the short legacy layout and the
//! route's `format_v1` identifiers on the wire. The layouts differ in
//! field positions, so the variant is fixed before any offset is read.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, RecordReader, RecordWriter};
use crate::dispatch::{Dispatched, Dispatcher, FormatSelect, RequestContext};
use crate::domain::{AppError, DomainErrorKind, ErrorTable};

pub const NAME: &str = "DashboardSummary";
pub const METHOD: &str = "POST";
pub const PATH: &str = "/dashboard/summary";

/// Old layout: Outstanding(0,10) Available(10,10) DueDate(20,8).
const MIN_DATA_LEN_OLD: usize = 28;
/// New layout: CustomerName(0,30) Outstanding(30,10) Available(40,10)
/// DueDate(50,8) Points(58,8).
const MIN_DATA_LEN_NEW: usize = 66;

static ERRORS: ErrorTable = ErrorTable::new(&[
    ("SVC110", DomainErrorKind::InvalidUserRef),
    ("01", DomainErrorKind::DataNotFound),
]);

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub user_ref: String,
    #[serde(default)]
    pub flag_old_format_req: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Absent in the old layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub outstanding_balance: f64,
    pub available_credit: f64,
    pub due_date: i64,
    /// Absent in the old layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_points: Option<i64>,
}

pub fn encode(req: &Request) -> String {
    RecordWriter::new()
        .str(&req.user_ref, 20)
        .str(if req.flag_old_format_req { "Y" } else { "N" }, 1)
        .finish()
}

pub fn decode(raw: &str, old_format: bool) -> Result<Response, DecodeError> {
    if old_format {
        let r = RecordReader::strip_header(raw, MIN_DATA_LEN_OLD)?;
        Ok(Response {
            customer_name: None,
            outstanding_balance: r.read_decimal2(0, 10),
            available_credit: r.read_decimal2(10, 10),
            due_date: r.read_int(20, 8),
            reward_points: None,
        })
    } else {
        let r = RecordReader::strip_header(raw, MIN_DATA_LEN_NEW)?;
        Ok(Response {
            customer_name: Some(r.read_str(0, 30)),
            outstanding_balance: r.read_decimal2(30, 10),
            available_credit: r.read_decimal2(40, 10),
            due_date: r.read_int(50, 8),
            reward_points: Some(r.read_int(58, 8)),
        })
    }
}

pub async fn call(
    dispatcher: Arc<Dispatcher>,
    ctx: RequestContext,
    req: Request,
) -> Result<Dispatched<Response>, AppError> {
    let old_format = req.flag_old_format_req;
    let select = if old_format {
        FormatSelect::V1
    } else {
        FormatSelect::Primary
    };
    let body = encode(&req);
    dispatcher
        .dispatch(
            &ctx,
            NAME,
            select,
            body,
            move |raw| decode(raw, old_format),
            |c, m| ERRORS.translate(c, m),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::HEADER_LEN;

    fn with_header(body: &str) -> String {
        format!("{}{}", " ".repeat(HEADER_LEN), body)
    }

    #[test]
    fn encode_carries_format_flag() {
        let body = encode(&Request {
            user_ref: "USER01".to_string(),
            flag_old_format_req: true,
        });
        assert_eq!(body.chars().count(), 21);
        assert!(body.ends_with('Y'));
    }

    #[test]
    fn old_layout_decodes_three_fields() {
        let body = "0000015000000850000020230215"; // Outstanding Available DueDate
        let resp = decode(&with_header(body), true).unwrap();
        assert_eq!(resp.outstanding_balance, 150.00);
        assert_eq!(resp.available_credit, 85000.00);
        assert_eq!(resp.due_date, 20230215);
        assert_eq!(resp.customer_name, None);
        assert_eq!(resp.reward_points, None);
    }

    #[test]
    fn new_layout_reads_shifted_offsets() {
        let body = format!(
            "{}{}{}{}{}",
            format!("{:<30}", "SOMCHAI JAIDEE"),
            "0000015000",
            "0008500000",
            "20230215",
            "00001250",
        );
        let resp = decode(&with_header(&body), false).unwrap();
        assert_eq!(resp.customer_name.as_deref(), Some("SOMCHAI JAIDEE"));
        assert_eq!(resp.outstanding_balance, 150.00);
        assert_eq!(resp.reward_points, Some(1250));
    }

    #[test]
    fn new_layout_rejects_old_length_body() {
        let body = "0000015000000850000020230215";
        let err = decode(&with_header(body), false).unwrap_err();
        assert!(matches!(err, DecodeError::ShortBody { .. }));
    }
}
