use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{self, AppState};

/// All application routes
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Metadata
        .route("/api/metadata", get(handlers::metadata::list_all))
        .route("/api/metadata/:entity", get(handlers::metadata::get_metadata))
        .route("/api/metadata/:entity/form", get(handlers::metadata::get_form))
        .route(
            "/api/metadata/:entity/form/validate",
            post(handlers::metadata::validate),
        )
        .route("/api/metadata/:entity/ui", get(handlers::metadata::get_ui_context))
        // Grouped entity lists
        .route("/api/entities/:entity", get(handlers::entities::list_grouped))
        .with_state(state)
}
