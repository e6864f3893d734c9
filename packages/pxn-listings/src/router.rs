//! HTTP router setup.

use crate::handlers;
use crate::middleware::{request_span, PxnRequestId};
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create(state: Arc<AppState>) -> Router {
    let listings = get(handlers::list_listings)
        .post(handlers::create_listing)
        .put(handlers::update_listing)
        .delete(handlers::delete_listing)
        .fallback(handlers::method_not_allowed);

    let cors_permissive = state.config.cors_permissive;

    let router = Router::new()
        .route("/listings", listings)
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        // Outermost last: the id is set before the span opens and echoed on the way out.
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(SetRequestIdLayer::x_request_id(PxnRequestId))
        .with_state(state);

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
