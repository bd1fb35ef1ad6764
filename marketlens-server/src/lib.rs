//! MarketLens server — thin HTTP transport over the core query service.
//!
//! All real invariants live in `marketlens-core`; this crate only routes,
//! serializes, and maps error classes to status codes. Loads touch the disk,
//! so handlers run them on the blocking pool.

pub mod error;
pub mod routes;

use axum::routing::get;
use axum::Router;
use marketlens_core::query::QueryService;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared application state: the query service behind every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QueryService>,
}

/// Build the router. `static_dir`, when given, is served at `/ui`.
pub fn app(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let mut router = Router::new()
        .route("/companies", get(routes::companies))
        .route("/data/{symbol}", get(routes::data))
        .route("/summary/{symbol}", get(routes::summary))
        .route("/compare", get(routes::compare))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    if let Some(dir) = static_dir {
        router = router.nest_service("/ui", ServeDir::new(dir));
    }
    router
}
