//! # Timetable Handlers
//!
//! The board endpoints. A move request is the drag gesture's command value; the
//! handler feeds it to the placement controller and turns the outcome into a
//! status code: `200` on commit, `409` on rejection.

use axum::{Json, extract::State, http::StatusCode};
use classgrid_core::{
    errors::GridError,
    models::{
        section::SectionId,
        timetable::{MoveResponse, SectionView, TimetableView},
    },
    timetable::{self, MoveCommand, MoveOutcome, Timetable},
};
use std::sync::Arc;
use tracing::info;

use crate::{ApiState, middleware::error_handling::AppError};

/// Returns the whole board: grid labels, placed sections and the unscheduled pool
#[axum::debug_handler]
pub async fn get_timetable(State(state): State<Arc<ApiState>>) -> Json<TimetableView> {
    let timetable = state.timetable.lock().await;

    Json(timetable.view())
}

/// Applies one move command
///
/// # Endpoint
///
/// ```text
/// POST /api/timetable/moves
/// {
///   "section_id": 2,
///   "source": { "kind": "unscheduled" },
///   "destination": { "kind": "slot", "day": "Sunday", "start": "09:00" }
/// }
/// ```
///
/// # Errors
///
/// * `GridError::NotFound` - Unknown section
/// * `GridError::StaleMove` - The source no longer matches the board
/// * `GridError::Persistence` - The collaborator refused the new schedule; the
///   board was restored
#[axum::debug_handler]
pub async fn move_section(
    State(state): State<Arc<ApiState>>,
    Json(command): Json<MoveCommand>,
) -> Result<(StatusCode, Json<MoveResponse>), AppError> {
    let mut timetable = state.timetable.lock().await;

    let transition = timetable.move_section(&command)?;
    let outcome = timetable::apply(&mut timetable, state.store.as_ref(), transition).await?;

    respond(&timetable, command.section_id, outcome)
}

/// Rebuilds the board from the collaborator's current records
#[axum::debug_handler]
pub async fn reload_timetable(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<TimetableView>, AppError> {
    let records = state
        .store
        .load_sections()
        .await
        .map_err(GridError::Persistence)?;

    let mut timetable = state.timetable.lock().await;
    let grid = timetable.grid().clone();
    *timetable = Timetable::load(grid, records);
    info!("Timetable reloaded");

    Ok(Json(timetable.view()))
}

pub(crate) fn respond(
    timetable: &Timetable,
    section_id: SectionId,
    outcome: MoveOutcome,
) -> Result<(StatusCode, Json<MoveResponse>), AppError> {
    let section = SectionView::new(timetable.section(section_id)?, timetable.grid());
    let phase = outcome.phase();
    let (status, rejection) = match outcome {
        MoveOutcome::Committed(_) => (StatusCode::OK, None),
        MoveOutcome::RolledBack(rejection) => (StatusCode::CONFLICT, Some(rejection)),
    };

    Ok((
        status,
        Json(MoveResponse {
            phase,
            section,
            rejection,
        }),
    ))
}
