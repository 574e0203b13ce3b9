//! Card portfolio inquiry.
//!
//! Mode Normal returns active cards; mode All includes closed cards, and
//! each block grows a ClosedDate column. The block layouts differ, so the
//! variant is fixed from the request before decoding.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, RecordReader, RecordWriter};
use crate::dispatch::{Dispatched, Dispatcher, FormatSelect, RequestContext};
use crate::domain::{AppError, DomainErrorKind, ErrorTable};

pub const NAME: &str = "MyCard";
pub const METHOD: &str = "POST";
pub const PATH: &str = "/my/card";

/// TotalCard(0,2); card blocks start at 2.
const MIN_DATA_LEN: usize = 2;
const GROUP_START: usize = 2;
/// Normal block: CardNo(0,16) CardType(16,4) Status(20,2)
/// CreditLimit(22,10) Expiry(32,4).
const ELEMENT_LEN_NORMAL: usize = 36;
/// All block adds ClosedDate(36,8).
const ELEMENT_LEN_ALL: usize = 44;

static ERRORS: ErrorTable = ErrorTable::new(&[
    ("SVC110", DomainErrorKind::InvalidUserRef),
    ("SVC120", DomainErrorKind::AccountClosed),
]);

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
pub enum CardMode {
    #[default]
    Normal,
    All,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub user_ref: String,
    #[serde(default)]
    pub mode: CardMode,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub total_card: i64,
    pub cards: Vec<CardItem>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardItem {
    pub card_no: String,
    pub card_type: String,
    pub status: String,
    pub credit_limit: f64,
    pub expiry: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_date: Option<i64>,
}

pub fn encode(req: &Request) -> String {
    let mode = match req.mode {
        CardMode::Normal => "N",
        CardMode::All => "A",
    };
    RecordWriter::new().str(&req.user_ref, 20).str(mode, 1).finish()
}

pub fn decode(raw: &str, mode: CardMode) -> Result<Response, DecodeError> {
    let r = RecordReader::strip_header(raw, MIN_DATA_LEN)?;
    let total_card = r.read_int(0, 2);
    let element_len = match mode {
        CardMode::Normal => ELEMENT_LEN_NORMAL,
        CardMode::All => ELEMENT_LEN_ALL,
    };
    let cards = r
        .read_group(GROUP_START, element_len, total_card as usize)
        .iter()
        .map(|b| CardItem {
            card_no: b.block_str(0, 16),
            card_type: b.block_str(16, 4),
            status: b.block_str(20, 2),
            credit_limit: b.block_decimal2(22, 10),
            expiry: b.block_int(32, 4),
            closed_date: match mode {
                CardMode::Normal => None,
                CardMode::All => Some(b.block_int(36, 8)),
            },
        })
        .collect();
    Ok(Response { total_card, cards })
}

pub async fn call(
    dispatcher: Arc<Dispatcher>,
    ctx: RequestContext,
    req: Request,
) -> Result<Dispatched<Response>, AppError> {
    let mode = req.mode;
    let body = encode(&req);
    dispatcher
        .dispatch(
            &ctx,
            NAME,
            FormatSelect::Primary,
            body,
            move |raw| decode(raw, mode),
            |c, m| ERRORS.translate(c, m),
        )
        .await
}
