//! Customer information inquiry.
//!
//! The request has two shapes: lookup by user ref / AEON ID (format 001)
//! or by national ID card number (format 004, the route's v2 pair). The
//! response declares its own layout with a 3-rune format tag at body
//! offset 0 — 001, 003 and 004 all differ in field positions, so the tag
//! is read before anything else.
//!
//! SVC117 is ambiguous across formats: for 001/003 it means the user ref
//! or AEON ID was invalid, for 004 an invalid ID card number. Translation
//! therefore takes the request format as context.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, RecordReader, RecordWriter};
use crate::dispatch::{Dispatched, Dispatcher, FormatSelect, RequestContext};
use crate::domain::{AppError, DomainErrorKind, ErrorTable};

pub const NAME: &str = "GetCustomerInfo";
pub const METHOD: &str = "POST";
pub const PATH: &str = "/customer/info";

/// 001: Tag(0,3) Name(3,30) BirthDate(33,8) MemberSince(41,8).
const MIN_DATA_LEN_001: usize = 49;
/// 003: 001 plus MobileNo(49,10).
const MIN_DATA_LEN_003: usize = 59;
/// 004: Tag(0,3) IdCardNo(3,13) Name(16,40) BirthDate(56,8).
const MIN_DATA_LEN_004: usize = 64;

static ERRORS_001: ErrorTable = ErrorTable::new(&[
    ("SVC117", DomainErrorKind::InvalidUserRef),
    ("SVC105", DomainErrorKind::DataNotFound),
]);

static ERRORS_004: ErrorTable = ErrorTable::new(&[
    ("SVC117", DomainErrorKind::InvalidIdCardNo),
    ("SVC105", DomainErrorKind::DataNotFound),
]);

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub user_ref: Option<String>,
    #[serde(default)]
    pub aeon_id: Option<String>,
    /// Presence selects the 004 request shape.
    #[serde(default)]
    pub id_card_no: Option<String>,
}

impl Request {
    pub fn uses_id_card(&self) -> bool {
        self.id_card_no.is_some()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub format: String,
    pub customer_name: String,
    pub birth_date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_since: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_card_no: Option<String>,
}

pub fn encode(req: &Request) -> String {
    match &req.id_card_no {
        Some(id_card_no) => RecordWriter::new().str(id_card_no, 13).finish(),
        None => RecordWriter::new()
            .str(req.user_ref.as_deref().unwrap_or(""), 20)
            .str(req.aeon_id.as_deref().unwrap_or(""), 10)
            .finish(),
    }
}

pub fn decode(raw: &str) -> Result<Response, DecodeError> {
    // The tag governs every other offset, so it is read first against the
    // smallest layout.
    let probe = RecordReader::strip_header(raw, 3)?;
    let tag = probe.read_str(0, 3);
    match tag.as_str() {
        "001" => {
            let r = RecordReader::strip_header(raw, MIN_DATA_LEN_001)?;
            Ok(Response {
                format: tag,
                customer_name: r.read_str(3, 30),
                birth_date: r.read_int(33, 8),
                member_since: Some(r.read_int(41, 8)),
                mobile_no: None,
                id_card_no: None,
            })
        }
        "003" => {
            let r = RecordReader::strip_header(raw, MIN_DATA_LEN_003)?;
            Ok(Response {
                format: tag,
                customer_name: r.read_str(3, 30),
                birth_date: r.read_int(33, 8),
                member_since: Some(r.read_int(41, 8)),
                mobile_no: Some(r.read_str(49, 10)),
                id_card_no: None,
            })
        }
        "004" => {
            let r = RecordReader::strip_header(raw, MIN_DATA_LEN_004)?;
            Ok(Response {
                format: tag,
                customer_name: r.read_str(16, 40),
                birth_date: r.read_int(56, 8),
                member_since: None,
                mobile_no: None,
                id_card_no: Some(r.read_str(3, 13)),
            })
        }
        _ => Err(DecodeError::UnknownFormat { tag }),
    }
}

pub async fn call(
    dispatcher: Arc<Dispatcher>,
    ctx: RequestContext,
    req: Request,
) -> Result<Dispatched<Response>, AppError> {
    let (select, table) = if req.uses_id_card() {
        (FormatSelect::V2, &ERRORS_004)
    } else {
        (FormatSelect::Primary, &ERRORS_001)
    };
    let body = encode(&req);
    dispatcher
        .dispatch(&ctx, NAME, select, body, decode, |c, m| {
            table.translate(c, m)
        })
        .await
}
