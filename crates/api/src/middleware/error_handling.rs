//! Maps engine errors to HTTP status codes and JSON error bodies.
//!
//! Placement rejections are not errors: handlers return them as `409`
//! responses carrying a `MoveResponse`, so they never pass through here.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use classgrid_core::errors::GridError;
use serde_json::json;
use tracing::error;

/// Error type returned by every fallible handler.
///
/// ```
/// use axum::Json;
/// use classgrid_api::middleware::error_handling::AppError;
/// use classgrid_core::errors::GridError;
///
/// async fn lookup(id: i32) -> Result<Json<i32>, AppError> {
///     if id < 0 {
///         Err(GridError::NotFound(format!("Section with ID {} not found", id)))?;
///     }
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub GridError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            GridError::NotFound(_) => StatusCode::NOT_FOUND,
            GridError::Validation(_) => StatusCode::BAD_REQUEST,
            GridError::StaleMove(_) => StatusCode::CONFLICT,
            GridError::Persistence(_) => StatusCode::BAD_GATEWAY,
            GridError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, "{}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl From<GridError> for AppError {
    fn from(err: GridError) -> Self {
        Self(err)
    }
}

/// A failed collaborator call is reported as a persistence error
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self(GridError::Persistence(err))
    }
}

pub fn map_error(err: GridError) -> Response {
    AppError::from(err).into_response()
}
