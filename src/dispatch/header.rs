//! Transport header framing for outbound requests.
//!
//! # Responsibilities
//! - Select the system/format pair for the request variant in use
//! - Build the fixed-width header prepended to every encoded body

use crate::codec::{pad_int_zero, pad_or_truncate};
use crate::config::Route;

pub const SYSTEM_WIDTH: usize = 10;
pub const SERVICE_WIDTH: usize = 10;
pub const FORMAT_WIDTH: usize = 3;
pub const REQUEST_ID_WIDTH: usize = 20;
pub const LENGTH_WIDTH: usize = 5;

/// Total width of the outbound header.
pub const REQUEST_HEADER_LEN: usize =
    SYSTEM_WIDTH + SERVICE_WIDTH + FORMAT_WIDTH + REQUEST_ID_WIDTH + LENGTH_WIDTH;

/// Which of a route's system/format pairs frames this request.
/// Operations with a single shape always use `Primary`; variant
/// operations pick `V1`/`V2` from request content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatSelect {
    #[default]
    Primary,
    V1,
    V2,
}

impl FormatSelect {
    /// Resolve the (system, format) pair, falling back to the primary
    /// pair when the route declares no alternate.
    pub fn resolve<'a>(self, route: &'a Route) -> (&'a str, &'a str) {
        let (system, format) = match self {
            Self::Primary => (None, None),
            Self::V1 => (route.system_v1.as_deref(), route.format_v1.as_deref()),
            Self::V2 => (route.system_v2.as_deref(), route.format_v2.as_deref()),
        };
        (
            system.unwrap_or(&route.system),
            format.unwrap_or(&route.format),
        )
    }
}

/// Build the outbound header for one call.
///
/// The length field is the route's configured constant when present,
/// otherwise the zero-padded rune count of the encoded body.
pub fn build_header(route: &Route, select: FormatSelect, request_id: &str, body: &str) -> String {
    let (system, format) = select.resolve(route);
    let length = route
        .request_length
        .unwrap_or_else(|| body.chars().count());
    let mut header = String::with_capacity(REQUEST_HEADER_LEN);
    header.push_str(&pad_or_truncate(system, SYSTEM_WIDTH));
    header.push_str(&pad_or_truncate(&route.service, SERVICE_WIDTH));
    header.push_str(&pad_or_truncate(format, FORMAT_WIDTH));
    header.push_str(&pad_or_truncate(request_id, REQUEST_ID_WIDTH));
    header.push_str(&pad_int_zero(length as i64, LENGTH_WIDTH));
    header
}
