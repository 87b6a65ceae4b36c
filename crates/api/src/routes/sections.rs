use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/sections", get(handlers::sections::list_sections))
        .route("/api/sections/:id", get(handlers::sections::get_section))
        .route(
            "/api/sections/:id/duration",
            put(handlers::sections::update_duration),
        )
}
