use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/timetable", get(handlers::timetable::get_timetable))
        .route(
            "/api/timetable/moves",
            post(handlers::timetable::move_section),
        )
        .route(
            "/api/timetable/reload",
            post(handlers::timetable::reload_timetable),
        )
}
