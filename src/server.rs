//! HTTP server.
//!
//! Serves the mistake search and the rule book as JSON, plus a small
//! browser page that calls both.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Browser page |
//! | `GET`  | `/rules` | The rule book |
//! | `POST` | `/search` | Resolve `{"mistake": "..."}` to a correction |
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/healthz` | Plain-text health check |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "..." } }
//! ```
//!
//! The four match outcomes are never errors: they are all `200` responses.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use sahw_core::matcher::Matcher;

use crate::config::Config;
use crate::corpus::build_matcher;
use crate::rules::{load_rules, RuleBook};
use crate::search::resolve_logged;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Shared application state passed to all route handlers.
///
/// Both members are built once at startup and only ever read.
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<Matcher>,
    pub rules: Arc<RuleBook>,
}

impl AppState {
    pub fn new(matcher: Matcher, rules: RuleBook) -> Self {
        Self {
            matcher: Arc::new(matcher),
            rules: Arc::new(rules),
        }
    }
}

/// Build the router with all routes and CORS.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_index))
        .route("/rules", get(handle_rules))
        .route("/search", post(handle_search))
        .route("/health", get(handle_health))
        .route("/healthz", get(handle_healthz))
        .layer(cors)
        .with_state(state)
}

/// Starts the HTTP server.
///
/// Builds the matcher and rule book once, binds to `[server].bind`, and
/// runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let state = AppState::new(build_matcher(config)?, load_rules(config)?);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, "server listening");
    println!("Sahw Helper listening on http://{}", config.server.bind);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

// ============ GET / ============

async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// ============ GET /health, /healthz ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn handle_healthz() -> &'static str {
    "Healthy"
}

// ============ GET /rules ============

#[derive(Serialize)]
struct RulesResponse<'a> {
    rules: &'a RuleBook,
}

async fn handle_rules(State(state): State<AppState>) -> Response {
    Json(RulesResponse {
        rules: &state.rules,
    })
    .into_response()
}

// ============ POST /search ============

/// Request body for `POST /search`. A missing or null `mistake` is treated
/// as empty input.
#[derive(Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub mistake: Option<String>,
}

/// Response body for `POST /search`.
#[derive(Serialize)]
pub struct SearchResponse {
    /// Rendered user-facing message.
    pub correction: String,
    /// One of `invalid_input`, `no_keywords`, `matched`, `no_match`.
    pub outcome: &'static str,
}

async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(req) = payload.map_err(|e| bad_request(e.body_text()))?;
    let input = req.mistake.unwrap_or_default();

    let resolution = resolve_logged(&state.matcher, &input);

    Ok(Json(SearchResponse {
        correction: resolution.outcome.message(),
        outcome: resolution.outcome.tag(),
    }))
}
