//! Card list inquiry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, RecordReader, RecordWriter};
use crate::dispatch::{Dispatched, Dispatcher, FormatSelect, RequestContext};
use crate::domain::{AppError, DomainErrorKind, ErrorTable};

pub const NAME: &str = "GetCardList";
pub const METHOD: &str = "POST";
pub const PATH: &str = "/card/list";

/// TotalCard(0,3); blocks at 3: CardNo(0,16) ProductCode(16,6)
/// CreditLimit(22,10) Flag(32,2).
const MIN_DATA_LEN: usize = 3;
const GROUP_START: usize = 3;
const ELEMENT_LEN: usize = 34;

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
    pub cards: Vec<CardItem>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardItem {
    pub card_no: String,
    pub product_code: String,
    pub credit_limit: f64,
    pub supplement_flag: String,
}

pub fn encode(req: &Request) -> String {
    RecordWriter::new().str(&req.user_ref, 20).finish()
}

pub fn decode(raw: &str) -> Result<Response, DecodeError> {
    let r = RecordReader::strip_header(raw, MIN_DATA_LEN)?;
    let total = r.read_int(0, 3) as usize;
    let cards = r
        .read_group(GROUP_START, ELEMENT_LEN, total)
        .iter()
        .map(|b| CardItem {
            card_no: b.block_str(0, 16),
            product_code: b.block_str(16, 6),
            credit_limit: b.block_decimal2(22, 10),
            supplement_flag: b.block_str(32, 2),
        })
        .collect();
    Ok(Response { cards })
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
    fn decode_card_blocks() {
        let block = format!("{:<16}{:<6}{}{}", "4111222233334444", "VISAGD", "0003000000", "P ");
        let raw = format!("{}001{}", " ".repeat(HEADER_LEN), block);
        let resp = decode(&raw).unwrap();
        assert_eq!(resp.cards.len(), 1);
        assert_eq!(resp.cards[0].product_code, "VISAGD");
        assert_eq!(resp.cards[0].credit_limit, 30000.00);
        assert_eq!(resp.cards[0].supplement_flag, "P");
    }

    #[test]
    fn partial_trailing_block_is_dropped() {
        let block = format!("{:<16}{:<6}{}{}", "4111222233334444", "VISAGD", "0003000000", "P ");
        // Second block declared but only half present.
        let raw = format!("{}002{}{}", " ".repeat(HEADER_LEN), block, "5500");
        let resp = decode(&raw).unwrap();
        assert_eq!(resp.cards.len(), 1);
    }
}
