//! Application startup and lifecycle management.

use crate::config::{CorsSettings, FingenieConfig};
use crate::gateway::{GatewayStatus, ModelGateway};
use crate::handlers::{ask_question, readiness_check, root};
use crate::services::providers::gemini::GeminiConnector;
use crate::services::providers::ProviderConnector;
use axum::{
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::tracing::{http_request_span, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FingenieConfig>,
    pub gateway: Arc<ModelGateway>,
}

impl AppState {
    pub fn new(config: FingenieConfig, connector: Arc<dyn ProviderConnector>) -> Self {
        let gateway = ModelGateway::new(
            config.gemini.api_key.clone(),
            config.gemini.model.clone(),
            connector,
        );

        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
        }
    }
}

/// CORS policy admitting exactly the configured frontend origin.
fn cors_layer(settings: &CorsSettings) -> Result<CorsLayer, AppError> {
    let origin = settings.allowed_origin.trim();
    if origin == "*" {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "CORS origin must be a single origin when credentials are allowed"
        )));
    }

    let origin = origin.parse::<HeaderValue>().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "Invalid CORS origin '{}': {}",
            settings.allowed_origin,
            e
        ))
    })?;

    Ok(CorsLayer::new()
        // A list only echoes the origin back when the request's Origin matches.
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let cors = cors_layer(&state.config.cors)?;

    let router = Router::new()
        .route("/", get(root))
        .route("/ready", get(readiness_check))
        .route("/ask", post(ask_question))
        .layer(TraceLayer::new_for_http().make_span_with(http_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state);

    Ok(router)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl Application {
    /// Build the application against the Gemini API.
    pub async fn build(config: FingenieConfig) -> Result<Self, AppError> {
        let connector = Arc::new(GeminiConnector::new(config.gemini.api_base.clone()));
        Self::build_with_connector(config, connector).await
    }

    pub async fn build_with_connector(
        config: FingenieConfig,
        connector: Arc<dyn ProviderConnector>,
    ) -> Result<Self, AppError> {
        let port = config.common.port;
        let state = AppState::new(config, connector);

        // An unconfigured gateway is not fatal: health checks keep working and
        // every /ask reports the misconfiguration.
        if let GatewayStatus::Unconfigured { reason } = state.gateway.warm_up() {
            tracing::warn!(reason = %reason, "Starting with an unconfigured model gateway");
        }

        let router = build_router(state.clone())?;

        // Port 0 picks a random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("fingenie-service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn gateway(&self) -> Arc<ModelGateway> {
        Arc::clone(&self.state.gateway)
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
