use ::http::{header, HeaderName, HeaderValue, Method};
use axum::{routing::get, Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub use super::routes::todos;

pub fn app(router: Router, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(|| async { Json("Todos API") }))
        .merge(router)
        .layer(cors)
}

/// CORS policy for a single allowed origin, or any origin for `*`.
pub fn cors_layer(allowed_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = if allowed_origin.trim() == "*" {
        AllowOrigin::any()
    } else {
        AllowOrigin::exact(HeaderValue::from_str(allowed_origin.trim())?)
    };
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::HEAD, Method::OPTIONS])
        .allow_headers([HeaderName::from_static("x-requested-with"), header::CONTENT_TYPE, header::AUTHORIZATION]))
}
