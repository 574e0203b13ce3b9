//! Generic dispatch engine.
//!
//! # Responsibilities
//! - Resolve route, destination and port for one operation call
//! - Frame, send and receive the fixed-width message
//! - Classify transport failures, translate backend error codes, decode
//!   the body
//! - Emit one audit "line" record per TCP call
//!
//! # Design Decisions
//! - Parameterized by the per-operation decode closure and error
//!   translation; every operation shares this single code path.
//! - CR/LF are stripped from the raw response for logging only. Offset
//!   parsing always sees the original bytes, preserving positions.
//! - Decode failure is governed by the configured leniency policy: under
//!   `lenient` the HTTP response is still a 200 with a degraded body.

use std::sync::Arc;
use std::time::Instant;

use rand::Rng;

use crate::audit::{AuditSink, LineRecord};
use crate::codec::record::{ERROR_CODE_RANGE, ERROR_MESSAGE_RANGE, HEADER_LEN};
use crate::codec::DecodeError;
use crate::config::schema::SYSTEM_I_DESTINATION;
use crate::config::{DecodeLeniency, GatewayConfig};
use crate::dispatch::header::{build_header, FormatSelect};
use crate::domain::{AppError, DomainError, TransportKind};
use crate::net::TcpClient;

/// Per-request identity threaded through dispatch and audit.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: String,
    pub source_ip: String,
    pub user_token: String,
    pub user_ref: String,
    pub method: String,
    pub path: String,
}

/// Outcome of one dispatched operation.
#[derive(Debug)]
pub enum Dispatched<T> {
    /// Backend replied cleanly and the body decoded.
    Success(T),
    /// Backend signaled a business error in the response header.
    Business(DomainError),
    /// Body decode failed under the lenient policy; the response is
    /// delivered without a payload.
    Degraded(DecodeError),
}

/// Shared engine executing every operation's downstream call.
pub struct Dispatcher {
    config: Arc<GatewayConfig>,
    client: TcpClient,
    audit: Arc<AuditSink>,
}

impl Dispatcher {
    pub fn new(config: Arc<GatewayConfig>, client: TcpClient, audit: Arc<AuditSink>) -> Self {
        Self {
            config,
            client,
            audit,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Execute one operation call end to end.
    ///
    /// `decode` parses the raw response (header strip included);
    /// `translate` maps a backend error code/message to the client
    /// payload, already bound to whatever format context the operation
    /// selected.
    pub async fn dispatch<T>(
        &self,
        ctx: &RequestContext,
        op_name: &str,
        select: FormatSelect,
        body: String,
        decode: impl Fn(&str) -> Result<T, DecodeError>,
        translate: impl Fn(&str, &str) -> DomainError,
    ) -> Result<Dispatched<T>, AppError> {
        let route = self
            .config
            .route(&ctx.method, &ctx.path)
            .ok_or_else(|| AppError::RouteNotFound(format!("{}:{}", ctx.method, ctx.path)))?;

        let destination = self
            .config
            .destinations
            .get(SYSTEM_I_DESTINATION)
            .ok_or_else(|| AppError::DestinationNotFound(SYSTEM_I_DESTINATION.to_string()))?;
        if destination.kind != "tcp" {
            return Err(AppError::DestinationNotTcp(SYSTEM_I_DESTINATION.to_string()));
        }

        let ports = destination
            .ports
            .get(op_name)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::EmptyPortPool {
                destination: SYSTEM_I_DESTINATION.to_string(),
                operation: op_name.to_string(),
            })?;
        let port = ports[rand::thread_rng().gen_range(0..ports.len())];
        let address = format!("{}:{}", destination.ip, port);

        let header = build_header(route, select, &ctx.request_id, &body);
        let payload = format!("{header}{body}");

        tracing::debug!(
            request_id = %ctx.request_id,
            operation = op_name,
            address = %address,
            payload_runes = payload.chars().count(),
            "Dispatching to System I"
        );

        let started = Instant::now();
        let raw = match self.client.send_and_receive(&address, &payload).await {
            Ok(raw) => raw,
            Err(e) => {
                let detail = e.to_string();
                let kind = TransportKind::classify(&detail);
                self.write_line(LineRecord {
                    request_id: ctx.request_id.clone(),
                    service: op_name.to_string(),
                    source_ip: ctx.source_ip.clone(),
                    dest_ip: address.clone(),
                    request: payload.clone(),
                    response: detail.clone(),
                    error_code: transport_code(kind).to_string(),
                    error_message: detail.clone(),
                    elapsed_ms: started.elapsed().as_millis(),
                })?;
                return Err(AppError::Transport { kind, detail });
            }
        };
        let elapsed_ms = started.elapsed().as_millis();
        // Logging copy only; offsets parse the original.
        let logged = raw.replace(['\r', '\n'], "");

        // The header region is ASCII by wire contract; verify before byte
        // slicing so a corrupt response cannot split a char boundary.
        if raw.len() >= HEADER_LEN && raw.as_bytes()[..HEADER_LEN].is_ascii() {
            let code = raw[ERROR_CODE_RANGE].trim();
            if !code.is_empty() {
                let message = raw[ERROR_MESSAGE_RANGE].trim();
                let domain = translate(code, message);
                self.write_line(LineRecord {
                    request_id: ctx.request_id.clone(),
                    service: op_name.to_string(),
                    source_ip: ctx.source_ip.clone(),
                    dest_ip: address,
                    request: payload,
                    response: logged,
                    error_code: domain.code.clone(),
                    error_message: domain.message.clone(),
                    elapsed_ms,
                })?;
                return Ok(Dispatched::Business(domain));
            }
        }

        match decode(&raw) {
            Ok(response) => {
                self.write_line(LineRecord {
                    request_id: ctx.request_id.clone(),
                    service: op_name.to_string(),
                    source_ip: ctx.source_ip.clone(),
                    dest_ip: address,
                    request: payload,
                    response: logged,
                    elapsed_ms,
                    ..Default::default()
                })?;
                Ok(Dispatched::Success(response))
            }
            Err(e) => {
                self.write_line(LineRecord {
                    request_id: ctx.request_id.clone(),
                    service: op_name.to_string(),
                    source_ip: ctx.source_ip.clone(),
                    dest_ip: address,
                    request: payload,
                    response: logged,
                    error_code: "DECODE".to_string(),
                    error_message: e.to_string(),
                    elapsed_ms,
                })?;
                match self.config.audit.decode_leniency {
                    DecodeLeniency::Lenient => {
                        tracing::warn!(
                            request_id = %ctx.request_id,
                            operation = op_name,
                            error = %e,
                            "Decode failed, returning degraded response (lenient policy)"
                        );
                        Ok(Dispatched::Degraded(e))
                    }
                    DecodeLeniency::Strict => Err(AppError::Decode(e)),
                }
            }
        }
    }

    fn write_line(&self, record: LineRecord) -> Result<(), AppError> {
        self.audit
            .write_line(&record)
            .map(|_| ())
            .map_err(|e| AppError::AuditSink(e.to_string()))
    }
}

fn transport_code(kind: TransportKind) -> &'static str {
    match kind {
        TransportKind::Timeout => "ER060",
        TransportKind::Internal => "ER099",
        TransportKind::Other => "ERIO",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditSink;
    use crate::config::{Destination, Route, TimeoutConfig};
    use crate::domain::ErrorTable;
    use crate::domain::DomainErrorKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    static TABLE: ErrorTable = ErrorTable::new(&[("SVC117", DomainErrorKind::InvalidIdCardNo)]);

    fn ctx() -> RequestContext {
        RequestContext {
            request_id: "req-1".to_string(),
            source_ip: "10.1.1.1".to_string(),
            method: "POST".to_string(),
            path: "/card/sales".to_string(),
            ..Default::default()
        }
    }

    async fn scripted_backend(response: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            socket.read_to_end(&mut buf).await.unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        port
    }

    fn dispatcher(port: u16, audit_dir: &std::path::Path) -> Dispatcher {
        let mut config = GatewayConfig::default();
        config.routes.insert(
            "POST:/card/sales".to_string(),
            Route {
                system: "SYSI".to_string(),
                service: "CARDSALES".to_string(),
                format: "001".to_string(),
                ..Default::default()
            },
        );
        let mut dest = Destination {
            kind: "tcp".to_string(),
            ip: "127.0.0.1".to_string(),
            ports: Default::default(),
        };
        dest.ports.insert("GetCardSales".to_string(), vec![port]);
        config
            .destinations
            .insert(SYSTEM_I_DESTINATION.to_string(), dest);

        let client = TcpClient::new(&TimeoutConfig {
            connect_secs: 1,
            read_secs: 1,
        });
        Dispatcher::new(
            Arc::new(config),
            client,
            Arc::new(AuditSink::new(audit_dir)),
        )
    }

    fn header_with_code(code: &str) -> String {
        let mut header = " ".repeat(HEADER_LEN);
        header.replace_range(67..67 + code.len(), code);
        header
    }

    #[tokio::test]
    async fn business_error_short_circuits_decode() {
        let response: &'static str =
            Box::leak(format!("{}{}", header_with_code("SVC117"), "BODY").into_boxed_str());
        let port = scripted_backend(response).await;
        let dir = tempfile::tempdir().unwrap();
        let d = dispatcher(port, dir.path());

        let outcome = d
            .dispatch(
                &ctx(),
                "GetCardSales",
                FormatSelect::Primary,
                "X".repeat(10),
                |_raw| -> Result<(), DecodeError> {
                    panic!("decode must not run when an error code is present")
                },
                |code, msg| TABLE.translate(code, msg),
            )
            .await
            .unwrap();

        match outcome {
            Dispatched::Business(err) => {
                assert_eq!(err.code, "SVC117");
                assert_eq!(err.error_code, "SI4001");
            }
            _ => panic!("expected business error"),
        }
    }

    #[tokio::test]
    async fn clean_response_decodes() {
        let response: &'static str =
            Box::leak(format!("{}{}", " ".repeat(HEADER_LEN), "HELLO").into_boxed_str());
        let port = scripted_backend(response).await;
        let dir = tempfile::tempdir().unwrap();
        let d = dispatcher(port, dir.path());

        let outcome = d
            .dispatch(
                &ctx(),
                "GetCardSales",
                FormatSelect::Primary,
                String::new(),
                |raw| Ok::<_, DecodeError>(raw[HEADER_LEN..].to_string()),
                |code, msg| TABLE.translate(code, msg),
            )
            .await
            .unwrap();

        match outcome {
            Dispatched::Success(body) => assert_eq!(body, "HELLO"),
            _ => panic!("expected success"),
        }
    }

    #[tokio::test]
    async fn short_response_degrades_under_lenient_policy() {
        let port = scripted_backend("TOO SHORT").await;
        let dir = tempfile::tempdir().unwrap();
        let d = dispatcher(port, dir.path());

        let outcome = d
            .dispatch(
                &ctx(),
                "GetCardSales",
                FormatSelect::Primary,
                String::new(),
                |raw| {
                    crate::codec::RecordReader::strip_header(raw, 1).map(|_| ())
                },
                |code, msg| TABLE.translate(code, msg),
            )
            .await
            .unwrap();

        assert!(matches!(outcome, Dispatched::Degraded(_)));
    }

    #[tokio::test]
    async fn missing_route_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let d = dispatcher(1, dir.path());
        let mut bad_ctx = ctx();
        bad_ctx.path = "/nope".to_string();

        let err = d
            .dispatch(
                &bad_ctx,
                "GetCardSales",
                FormatSelect::Primary,
                String::new(),
                |_| Ok::<_, DecodeError>(()),
                |code, msg| TABLE.translate(code, msg),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RouteNotFound(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn refused_port_is_transport_error_with_line_log() {
        let dir = tempfile::tempdir().unwrap();
        // Nothing listens on port 1.
        let d = dispatcher(1, dir.path());

        let err = d
            .dispatch(
                &ctx(),
                "GetCardSales",
                FormatSelect::Primary,
                String::new(),
                |_| Ok::<_, DecodeError>(()),
                |code, msg| TABLE.translate(code, msg),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Transport { .. }));

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1, "transport failure must still write a line record");
    }
}
