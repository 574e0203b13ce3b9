//! System I Gateway Library
//!
//! Translates JSON/HTTP requests into fixed-width positional TCP messages
//! for the legacy System I backend and the fixed-width responses back
//! into JSON.

pub mod audit;
pub mod codec;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod http;
pub mod net;
pub mod ops;

pub use config::GatewayConfig;
pub use http::HttpServer;
