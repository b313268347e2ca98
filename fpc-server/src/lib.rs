//! fpc-server library - control-strip diagnosis over HTTP
//!
//! Wraps the diagnostic engine from `fpc-common` and the reading log behind a
//! small JSON API used by the darkroom log form.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use fpc_common::diagnostics::ToleranceTable;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod error;

/// Readings are a few hundred bytes; anything near this is not a strip
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Reading log connection pool
    pub db: SqlitePool,
    /// Tolerance bands, loaded once from config
    pub tolerances: Arc<ToleranceTable>,
}

impl AppState {
    pub fn new(db: SqlitePool, tolerances: ToleranceTable) -> Self {
        Self {
            db,
            tolerances: Arc::new(tolerances),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::root_status))
        .route("/api/faults", get(api::list_faults))
        .route("/api/faults/:id", get(api::get_fault))
        .route("/api/diagnose", post(api::diagnose))
        .route("/api/readings", post(api::log_reading))
        .route("/api/readings/:process", get(api::recent_readings))
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
