//! Shared operation handler.
//!
//! # Responsibilities
//! - Validate API key and establish the request ID
//! - Run the operation's call fn against the dispatch engine
//! - Write the audit "main" record
//! - Map the outcome to the legacy JSON envelope
//!
//! # Design Decisions
//! - One generic template instead of one handler per operation; the
//!   per-operation differences are only the request/response types and
//!   the call fn.
//! - An audit-sink failure turns any outcome into a 500: the record is a
//!   precondition for delivering the response.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::audit::MainRecord;
use crate::dispatch::{Dispatched, Dispatcher, RequestContext};
use crate::domain::{AppError, DomainError, DomainErrorKind};
use crate::http::request::{extract_request_id, header_or_empty, X_API_KEY, X_USER_REF, X_USER_TOKEN};
use crate::http::server::AppState;

/// Legacy response envelope. Business errors are embedded here under a
/// 200 status; `data` and `error` never both appear.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DomainError>,
}

impl<T: Serialize> Envelope<T> {
    fn data(value: T) -> Self {
        Self {
            data: Some(value),
            error: None,
        }
    }

    fn error(error: DomainError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}

/// The five-step template every operation handler follows.
#[allow(clippy::too_many_arguments)]
pub async fn run_operation<Req, Resp, F, Fut>(
    state: AppState,
    headers: HeaderMap,
    addr: SocketAddr,
    method: &'static str,
    path: &'static str,
    op_name: &'static str,
    req: Req,
    call: F,
) -> Response
where
    Req: Serialize,
    Resp: Serialize,
    F: FnOnce(Arc<Dispatcher>, RequestContext, Req) -> Fut,
    Fut: Future<Output = Result<Dispatched<Resp>, AppError>>,
{
    let started = Instant::now();

    if !state.config.security.api_keys.is_empty() {
        let provided = header_or_empty(&headers, X_API_KEY);
        if !state.config.security.api_keys.iter().any(|k| *k == provided) {
            return (StatusCode::UNAUTHORIZED, "Invalid API key").into_response();
        }
    }

    let ctx = RequestContext {
        request_id: extract_request_id(&headers),
        source_ip: addr.ip().to_string(),
        user_token: header_or_empty(&headers, X_USER_TOKEN),
        user_ref: header_or_empty(&headers, X_USER_REF),
        method: method.to_string(),
        path: path.to_string(),
    };

    let request_json = serde_json::to_string(&req).unwrap_or_default();

    tracing::debug!(
        request_id = %ctx.request_id,
        operation = op_name,
        source_ip = %ctx.source_ip,
        "Handling operation"
    );

    let mut record = MainRecord {
        request_id: ctx.request_id.clone(),
        service: op_name.to_string(),
        source_ip: ctx.source_ip.clone(),
        user_token: ctx.user_token.clone(),
        user_ref: ctx.user_ref.clone(),
        request: request_json,
        ..Default::default()
    };

    let (status, body) = match call(state.dispatcher.clone(), ctx.clone(), req).await {
        Ok(Dispatched::Success(resp)) => {
            let envelope = Envelope::data(resp);
            record.response = serde_json::to_string(&envelope).unwrap_or_default();
            (StatusCode::OK, envelope)
        }
        Ok(Dispatched::Business(err)) => {
            record.error_code = err.code.clone();
            record.error_message = err.message.clone();
            let envelope = Envelope::error(err);
            record.response = serde_json::to_string(&envelope).unwrap_or_default();
            (StatusCode::OK, envelope)
        }
        Ok(Dispatched::Degraded(e)) => {
            // Lenient decode policy: the call is answered, the payload is
            // not. The audit trail carries the decode failure.
            record.error_code = "DECODE".to_string();
            record.error_message = e.to_string();
            (StatusCode::OK, Envelope::empty())
        }
        Err(app) => {
            tracing::error!(
                request_id = %ctx.request_id,
                operation = op_name,
                error = %app,
                "Operation failed"
            );
            record.error_code = app.status_code().to_string();
            record.error_message = app.to_string();
            let status = StatusCode::from_u16(app.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let envelope = Envelope::error(
                DomainErrorKind::UnexpectedSystem.into_domain_error("", &service_error_text(&app)),
            );
            record.response = serde_json::to_string(&envelope).unwrap_or_default();
            (status, envelope)
        }
    };

    record.elapsed_ms = started.elapsed().as_millis();
    if let Err(e) = state.audit.write_main(&record) {
        tracing::error!(
            request_id = %ctx.request_id,
            error = %e,
            "Audit main record failed, escalating to 500"
        );
        return (StatusCode::INTERNAL_SERVER_ERROR, "Audit log failure").into_response();
    }

    (status, Json(body)).into_response()
}

/// Client-safe text for infrastructure failures; internals stay in the
/// audit trail.
fn service_error_text(err: &AppError) -> String {
    match err {
        AppError::Transport { kind, .. } => match kind {
            crate::domain::TransportKind::Timeout => "Gateway timeout".to_string(),
            _ => "Service unavailable".to_string(),
        },
        _ => "Service error".to_string(),
    }
}
