//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, one route per operation)
//!     → request.rs (request ID, header validation)
//!     → handlers.rs (bind JSON → call engine → audit → respond)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Business errors ride inside a 200 JSON body with an embedded error
//!   object; only infrastructure failures change the HTTP status. This is
//!   the legacy client contract.
//! - Every handler follows the same five-step template, captured once in
//!   handlers.rs; operations contribute only their types and call fn.

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{extract_request_id, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
