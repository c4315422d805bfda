// Copyright 2026 Job Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST API for Job Scout.
//!
//! `POST /api/jobs/scrape` takes a JSON search request; `GET` on the same path
//! maps query-string parameters onto the same request and follows the same
//! path. Every response is JSON with a `success` flag.

use crate::service::JobService;
use axum::body::{Body, Bytes};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use job_scout::{parse_count, NormalizedJob, ScoutError, SearchRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Path of the scrape endpoint.
pub const SCRAPE_PATH: &str = "/api/jobs/scrape";

/// Successful search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub count: usize,
    pub jobs: Vec<NormalizedJob>,
}

/// Failure response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

/// Errors surfaced by the REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Scout(#[from] ScoutError),

    #[error("{0}")]
    Request(String),
}

impl ApiError {
    /// 400 for missing required fields, 500 for everything else.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Scout(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut message = self.to_string();
        if message.trim().is_empty() {
            message = "Internal error".to_string();
        }
        if status.is_server_error() {
            tracing::error!("search failed: {message}");
        }

        let body = ErrorBody {
            success: false,
            error: ErrorDetail { message },
        };
        (status, Json(body)).into_response()
    }
}

/// Query-string form of a search request. Every value arrives as text.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub date_since_posted: Option<String>,
    pub limit: Option<String>,
    pub experience_level: Option<String>,
    pub remote_filter: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
}

impl From<SearchParams> for SearchRequest {
    fn from(params: SearchParams) -> Self {
        SearchRequest {
            keywords: params.keywords,
            location: params.location,
            date_since_posted: params.date_since_posted,
            limit: params.limit.as_deref().and_then(parse_count),
            experience_level: params.experience_level,
            remote_filter: params.remote_filter,
            sort_by: params.sort_by,
            page: params.page.as_deref().and_then(parse_count),
        }
    }
}

/// Build the axum Router with all REST endpoints.
pub fn router(service: Arc<JobService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        tracing::info_span!(
            "http",
            method = %req.method(),
            path = %req.uri().path(),
            request_id = %Uuid::new_v4(),
        )
    });

    Router::new()
        .route("/health", get(health))
        .route(SCRAPE_PATH, get(scrape_get).post(scrape_post))
        .layer(trace)
        .layer(cors)
        .with_state(service)
}

/// Start the REST API server and run until Ctrl-C.
pub async fn start(addr: &str, service: Arc<JobService>) -> anyhow::Result<()> {
    use anyhow::Context;

    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("REST API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("received shutdown signal");
        })
        .await?;
    Ok(())
}

/// Validate, fetch, and normalize.
pub async fn run_search(
    service: &JobService,
    request: SearchRequest,
) -> Result<SearchResponse, ApiError> {
    let query = request.validate()?;
    let jobs = service.search(&query).await?;
    Ok(SearchResponse {
        success: true,
        count: jobs.len(),
        jobs,
    })
}

/// Parse a POST body.
///
/// Only unparseable JSON is an error. An empty body or any document that is
/// not an object is an empty request, which then fails validation.
pub fn parse_body(body: &[u8]) -> Result<SearchRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SearchRequest::default());
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::Request(format!("Invalid JSON body: {e}")))?;
    Ok(SearchRequest::from_json(value))
}

// ── Handlers ────────────────────────────────────────────────────

async fn health(State(service): State<Arc<JobService>>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "strategy": service.strategy_kind(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn scrape_post(State(service): State<Arc<JobService>>, body: Bytes) -> Response {
    match parse_body(&body) {
        Ok(request) => respond(&service, request).await,
        Err(e) => e.into_response(),
    }
}

async fn scrape_get(
    State(service): State<Arc<JobService>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    match params {
        Ok(Query(params)) => respond(&service, params.into()).await,
        Err(e) => ApiError::Request(e.body_text()).into_response(),
    }
}

async fn respond(service: &JobService, request: SearchRequest) -> Response {
    match run_search(service, request).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}
