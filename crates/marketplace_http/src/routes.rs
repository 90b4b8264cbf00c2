//! Router assembly and middleware.

use crate::handlers::{add_item, get_image, get_item, get_items, hello, search};
use crate::state::AppState;
use axum::extract::{DefaultBodyLimit, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use log::info;
use std::time::Instant;
use tower_http::cors::CorsLayer;

/// Upper bound for a multipart upload body.
pub const MAX_UPLOAD_BYTES: usize = 32 << 20;

/// Builds the application router.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/items", get(get_items).post(add_item))
        .route("/items/{id}", get(get_item))
        .route("/images/{filename}", get(get_image))
        .route("/search", get(search))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(log_requests))
        .layer(cors)
        .with_state(state)
}

/// CORS policy allowing the web frontend at `front_url`.
pub fn cors_layer(front_url: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(front_url)
        .allow_methods([Method::GET, Method::HEAD, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

async fn log_requests(req: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let response = next.run(req).await;

    info!(
        "event=http_request module=http method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
