use axum::http::HeaderName;
use tower_http::cors::{Any, CorsLayer};

/// Browser clients on any origin may call the API.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
        .expose_headers([HeaderName::from_static(
            super::request_log::REQUEST_ID_HEADER,
        )])
}
