//! HTTP server for the front end.
//!
//! # Responsibilities
//! - Create the Axum router with page and API handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve until the shutdown signal fires

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::abi::erc721_abi;
use crate::config::{ContractSpec, ProjectConfig};
use crate::lifecycle::ShutdownReason;
use crate::web::pages::{IndexPage, NotFoundPage};
use crate::web::provider::Web3Library;
use crate::web::shell::{AppShell, Page, RenderContext};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProjectConfig>,
    pub library: Web3Library,
    pub shell: Arc<AppShell>,
}

/// HTTP server for the front end.
pub struct WebServer {
    router: Router,
}

impl WebServer {
    pub fn new(config: ProjectConfig, library: Web3Library) -> Self {
        let timeout = Duration::from_secs(config.server.request_timeout_secs);
        let state = AppState {
            config: Arc::new(config),
            library,
            shell: Arc::new(AppShell::new()),
        };
        Self {
            router: Self::build_router(state, timeout),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, timeout: Duration) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/health", get(health_handler))
            .route("/api/abi/erc721", get(abi_handler))
            .route("/api/contracts", get(contracts_handler))
            .fallback(not_found_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<ShutdownReason>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                if let Ok(reason) = shutdown.recv().await {
                    tracing::info!(reason, "Draining in-flight requests");
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn render(state: &AppState, page: &dyn Page, connected: bool) -> String {
    let ctx = RenderContext {
        library: &state.library,
        config: &state.config,
        connected,
    };
    state.shell.render(page, &ctx)
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let connected = state.library.is_connected().await;
    Html(render(&state, &IndexPage, connected))
}

async fn not_found_handler(State(state): State<AppState>, uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "No page matched");
    let page = NotFoundPage {
        path: uri.path().to_string(),
    };
    (StatusCode::NOT_FOUND, Html(render(&state, &page, false))).into_response()
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    network: String,
    chain_id: u64,
    rpc_connected: bool,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        network: state.library.network().to_string(),
        chain_id: state.library.chain_id(),
        rpc_connected: state.library.is_connected().await,
    })
}

async fn abi_handler() -> Response {
    match erc721_abi() {
        Ok(abi) => Json(abi).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build ERC-721 ABI");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn contracts_handler(State(state): State<AppState>) -> Json<Vec<ContractSpec>> {
    Json(state.config.deploy.contracts.clone())
}
