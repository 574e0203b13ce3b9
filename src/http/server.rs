//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with one route per operation
//! - Wire up middleware (tracing, timeout)
//! - Bind server to listener
//! - Share the dispatch engine and audit sink with handlers

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ConnectInfo;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::audit::AuditSink;
use crate::config::GatewayConfig;
use crate::dispatch::Dispatcher;
use crate::http::handlers;
use crate::net::TcpClient;
use crate::ops;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub dispatcher: Arc<Dispatcher>,
    pub audit: Arc<AuditSink>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

macro_rules! op_route {
    ($router:expr, $state:expr, $module:ident) => {{
        let state = $state.clone();
        $router.route(
            ops::$module::PATH,
            post(
                move |headers: HeaderMap,
                      ConnectInfo(addr): ConnectInfo<SocketAddr>,
                      Json(req): Json<ops::$module::Request>| {
                    handlers::run_operation(
                        state.clone(),
                        headers,
                        addr,
                        ops::$module::METHOD,
                        ops::$module::PATH,
                        ops::$module::NAME,
                        req,
                        ops::$module::call,
                    )
                },
            ),
        )
    }};
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let config = Arc::new(config);
        let audit = Arc::new(AuditSink::new(&config.audit.dir));
        let client = TcpClient::new(&config.timeouts);
        let dispatcher = Arc::new(Dispatcher::new(config.clone(), client, audit.clone()));

        let state = AppState {
            config: config.clone(),
            dispatcher,
            audit,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router: one declarative registration per operation,
    /// all sharing the same handler template.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut router = Router::new();
        router = op_route!(router, state, get_dealer_agreement);
        router = op_route!(router, state, get_card_sales);
        router = op_route!(router, state, dashboard_summary);
        router = op_route!(router, state, my_card);
        router = op_route!(router, state, get_customer_info);
        router = op_route!(router, state, get_card_list);
        router = op_route!(router, state, get_payment_history);
        router = op_route!(router, state, get_consent_list);
        router = op_route!(router, state, update_consent);
        router = op_route!(router, state, verify_customer);
        router = op_route!(router, state, get_statement_summary);
        router = op_route!(router, state, register_card_holder);

        router
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.len(),
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
    }
    tracing::info!("Shutdown signal received");
}
