//! Request correlation.
//!
//! Clients may send their own `x-request-id`; otherwise one is minted here.
//! Either way the id lands in the request extensions, on the trace span and
//! on the response.

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;

/// Mints `pxn-<16 hex>` ids for requests that arrive without one.
#[derive(Clone, Copy, Debug, Default)]
pub struct PxnRequestId;

impl MakeRequestId for PxnRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = format!("pxn-{:016x}", rand::random::<u64>());
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// The correlation id set by [`PxnRequestId`], or `""` outside the router.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or_default()
}

/// HTTP span carrying the correlation id.
pub fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        req_id = %request_id(request),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minted_ids_are_prefixed_and_distinct() {
        let request = Request::new(());
        let mut make = PxnRequestId;
        let a = make.make_request_id(&request).unwrap();
        let b = make.make_request_id(&request).unwrap();
        let a = a.header_value().to_str().unwrap();
        assert!(a.starts_with("pxn-"));
        assert_eq!(a.len(), "pxn-".len() + 16);
        assert_ne!(a, b.header_value().to_str().unwrap());
    }

    #[test]
    fn test_missing_id_reads_empty() {
        assert_eq!(request_id(&Request::new(())), "");
    }
}
