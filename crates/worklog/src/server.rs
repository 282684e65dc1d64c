//! HTTP server for report generation
//!
//! [`ReportServer`] owns everything a request needs (the optimizer and the
//! template to render with) and is shared across requests by reference
//! counting; no request mutates it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::handlers::{
    self, GenerateReportInput, GenerateReportOutput, HandlerError, HealthResponse,
    OptimizeReportInput, OptimizeReportOutput,
};
use crate::optimize::Optimizer;

struct ServerState {
    optimizer: Optimizer,
    template: Option<PathBuf>,
}

/// The report HTTP server
#[derive(Clone)]
pub struct ReportServer {
    state: Arc<ServerState>,
}

impl ReportServer {
    /// Create a server rendering with `template`, or the built-in default
    #[must_use]
    pub fn new(optimizer: Optimizer, template: Option<PathBuf>) -> Self {
        Self {
            state: Arc::new(ServerState {
                optimizer,
                template,
            }),
        }
    }

    /// The optimizer used by `/api/optimize-report`
    #[must_use]
    pub fn optimizer(&self) -> &Optimizer {
        &self.state.optimizer
    }

    /// The template reports are rendered with, if not the default
    #[must_use]
    pub fn template(&self) -> Option<&Path> {
        self.state.template.as_deref()
    }

    /// Build the router with permissive CORS
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any);

        Router::new()
            .route("/api/generate-report", post(generate_report))
            .route("/api/optimize-report", post(optimize_report))
            .route("/api/health", get(health))
            .layer(cors)
            .with_state(self.clone())
    }

    /// Serve requests on `listener` until the process exits
    ///
    /// # Errors
    ///
    /// Returns an I/O error if accepting connections fails.
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        info!(%addr, "report server listening");
        axum::serve(listener, self.router()).await
    }
}

async fn generate_report(
    State(server): State<ReportServer>,
    body: Bytes,
) -> Result<Json<GenerateReportOutput>, HandlerError> {
    let input: GenerateReportInput = handlers::parse_input(&body)?;
    debug!(repo = %input.repo_path, "generate-report request");

    let template = server.template().map(Path::to_path_buf);
    let output = tokio::task::spawn_blocking(move || {
        handlers::generate_report(&input, template.as_deref())
    })
    .await??;
    Ok(Json(output))
}

async fn optimize_report(
    State(server): State<ReportServer>,
    body: Bytes,
) -> Result<Json<OptimizeReportOutput>, HandlerError> {
    let input: OptimizeReportInput = handlers::parse_input(&body)?;
    let output = handlers::optimize_report(server.optimizer(), input).await?;
    Ok(Json(output))
}

async fn health() -> Json<HealthResponse> {
    Json(handlers::health())
}
