//! Operation catalogue.
//!
//! # Data Flow
//! ```text
//! one module per System I operation:
//!     Request struct  → encode() → fixed-width body
//!     raw response    → decode() → Response struct
//!     backend code    → ERRORS table → DomainError
//!     call()          → shared dispatch engine
//! ```
//!
//! # Design Decisions
//! - Operations contribute data (field columns, error rows, route
//!   constants), never plumbing; the engine owns the call sequence.
//! - Offsets in decoders are body-relative runes, written next to the
//!   reads they govern.
//! - Count fields in encoders are derived from the list length, so the
//!   emitted block count can never disagree with the count column.

pub mod dashboard_summary;
pub mod get_card_list;
pub mod get_card_sales;
pub mod get_consent_list;
pub mod get_customer_info;
pub mod get_dealer_agreement;
pub mod get_payment_history;
pub mod get_statement_summary;
pub mod my_card;
pub mod register_card_holder;
pub mod update_consent;
pub mod verify_customer;
