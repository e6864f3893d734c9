//! HTTP request handlers.

use crate::error::Error;
use crate::metrics::METRICS;
use crate::middleware::request_id;
use crate::response::{ErrorResponse, HealthResponse};
use crate::state::AppState;
use crate::wire;
use axum::body::Bytes;
use axum::extract::{Request, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http_body_util::LengthLimitError;
use pxn_types::{Command, CommandError, Listings};
use std::error::Error as StdError;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

/// Methods served on `/listings`, as sent in the `Allow` header.
pub const LISTINGS_ALLOW: &str = "GET, POST, PUT, DELETE";

/// `GET /listings`
pub async fn list_listings(State(state): State<Arc<AppState>>) -> Result<Json<Listings>, Error> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    Ok(Json(state.processor.listings().await?))
}

/// `POST /listings`
pub async fn create_listing(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Listings>, Error> {
    run_command(&state, request, wire::decode_create).await
}

/// `PUT /listings` (update or favorite toggle)
pub async fn update_listing(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Listings>, Error> {
    run_command(&state, request, wire::decode_put).await
}

/// `DELETE /listings`
pub async fn delete_listing(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Listings>, Error> {
    run_command(&state, request, wire::decode_delete).await
}

/// Any other method on `/listings`.
pub async fn method_not_allowed(method: Method) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, LISTINGS_ALLOW)],
        Json(ErrorResponse::new(format!("Method {method} Not Allowed"))),
    )
        .into_response()
}

/// Health check with store status.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status, listings) = match state.processor.listings().await {
        Ok(listings) => ("ok", Some(listings.len())),
        Err(_) => ("degraded", None),
    };
    Json(HealthResponse {
        status,
        uptime_secs: state.start_time.elapsed().as_secs(),
        requests: state.request_count.load(Ordering::Relaxed),
        listings,
    })
}

/// Prometheus metrics in text exposition format.
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let listings = state
        .processor
        .listings()
        .await
        .map(|l| l.len())
        .unwrap_or(0);
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        METRICS.render(listings),
    )
}

/// Decode the body, execute the command, and record the outcome.
async fn run_command(
    state: &AppState,
    request: Request,
    decode: fn(&[u8]) -> Result<Command, CommandError>,
) -> Result<Json<Listings>, Error> {
    let start = std::time::Instant::now();
    METRICS.commands_total.fetch_add(1, Ordering::Relaxed);
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let req_id = request_id(&request).to_string();

    let result = match read_body(request, state.config.max_body_bytes).await {
        Ok(body) => execute(state, &body, decode).await.map_err(Error::from),
        Err(err) => Err(err),
    };
    METRICS.record_command_duration(start);

    match result {
        Ok((command, listings)) => {
            METRICS.commands_applied.fetch_add(1, Ordering::Relaxed);
            info!(req_id = %req_id, command, listings = listings.len(), "Command applied");
            Ok(Json(listings))
        }
        Err(err) => {
            if let Error::Command(cmd) = &err {
                METRICS.record_rejection(cmd);
            }
            warn!(req_id = %req_id, status = %err.status(), error = %err, "Command rejected");
            Err(err)
        }
    }
}

/// Buffer the body up to `limit` bytes.
async fn read_body(request: Request, limit: usize) -> Result<Bytes, Error> {
    axum::body::to_bytes(request.into_body(), limit)
        .await
        .map_err(|e| {
            let root: &(dyn StdError + 'static) = &e;
            let over_limit = std::iter::successors(Some(root), |e| (*e).source())
                .any(|e| e.is::<LengthLimitError>());
            if over_limit {
                Error::PayloadTooLarge { limit }
            } else {
                CommandError::malformed(format!("unreadable body: {e}")).into()
            }
        })
}

async fn execute(
    state: &AppState,
    body: &[u8],
    decode: fn(&[u8]) -> Result<Command, CommandError>,
) -> Result<(&'static str, Listings), CommandError> {
    let command = decode(body)?;
    let kind = command.kind().as_str();
    let listings = state.processor.execute(command).await?;
    Ok((kind, listings))
}
