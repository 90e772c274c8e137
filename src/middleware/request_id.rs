//! Correlation ids for requests.
//!
//! `SetRequestIdLayer` keeps a caller-supplied `x-request-id` or assigns a v4
//! UUID, and stores it in the request extensions; `PropagateRequestIdLayer`
//! copies it onto the response. The trace span and the handlers read it back
//! from the extensions.

use axum::{body::Body, extract::Request, http::HeaderName};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Outermost layer: must run before the trace span is built
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(request_id_header(), MakeRequestUuid)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(request_id_header())
}

/// Printable form of a request id. Ids that are not visible ASCII print as `unknown`.
pub fn request_id_str(request_id: &RequestId) -> &str {
    request_id.header_value().to_str().unwrap_or("unknown")
}

/// Span for `TraceLayer` carrying the request id
pub fn make_span_with_request_id(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(request_id_str)
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_id_prints_header_value() {
        let id = RequestId::new(HeaderValue::from_static("trace-me-42"));
        assert_eq!(request_id_str(&id), "trace-me-42");
    }

    #[test]
    fn test_non_ascii_request_id_prints_unknown() {
        let id = RequestId::new(HeaderValue::from_bytes(b"caf\xc3\xa9").unwrap());
        assert_eq!(request_id_str(&id), "unknown");
    }

    #[test]
    fn test_span_without_request_id_is_still_built() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        // Spans are disabled without a subscriber; building one must not panic
        let _span = make_span_with_request_id(&request);
    }
}
