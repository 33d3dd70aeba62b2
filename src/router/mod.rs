//! Routing module for the storefront server
//!
//! Assembles the JSON endpoints, the static asset fallback and the
//! request middleware.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::state::SharedState;

/// Creates and configures the application router with all routes and
/// middleware.
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: log requests, and failures louder.
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let method = req.method().clone();
        let uri = req.uri().clone();
        let res = next.run(req).await;
        if res.status().is_success() {
            info!(%method, %uri, status = %res.status(), "request");
        } else {
            warn!(%method, %uri, status = %res.status(), "request failed");
        }
        res
    });

    // Middleware: CORS (permissive for local dev).
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(crate::catalog::routes())
        .fallback(serve_asset)
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}

/// Fallback route: serves files beneath the assets directory, with `/`
/// mapping to `index.html`. Unknown paths and traversal attempts answer
/// 404.
async fn serve_asset(State(state): State<SharedState>, uri: Uri) -> Response {
    let path = match uri.path() {
        "/" => "index.html",
        other => other.trim_start_matches('/'),
    };
    if path.split('/').any(|segment| segment == "..") {
        return StatusCode::NOT_FOUND.into_response();
    }

    match tokio::fs::read(state.assets_dir.join(path)).await {
        Ok(contents) => (
            [(
                header::CONTENT_TYPE,
                format!("{}; charset=utf-8", content_type_for(path)),
            )],
            contents,
        )
            .into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Content type by file extension, defaulting to plain text.
fn content_type_for(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("html") => "text/html",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("ico") => "image/x-icon",
        _ => "text/plain",
    }
}
