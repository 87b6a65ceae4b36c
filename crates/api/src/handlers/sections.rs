use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use classgrid_core::{
    models::{
        section::SectionId,
        timetable::{MoveResponse, SectionView, UpdateDurationRequest},
    },
    timetable,
};
use std::sync::Arc;

use crate::{ApiState, handlers::timetable::respond, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn list_sections(State(state): State<Arc<ApiState>>) -> Json<Vec<SectionView>> {
    let timetable = state.timetable.lock().await;

    Json(
        timetable
            .sections()
            .map(|section| SectionView::new(section, timetable.grid()))
            .collect(),
    )
}

#[axum::debug_handler]
pub async fn get_section(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<SectionId>,
) -> Result<Json<SectionView>, AppError> {
    let timetable = state.timetable.lock().await;
    let section = timetable.section(id)?;

    Ok(Json(SectionView::new(section, timetable.grid())))
}

/// Changes a section's session length, re-checking its cells when it is placed
#[axum::debug_handler]
pub async fn update_duration(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<SectionId>,
    Json(payload): Json<UpdateDurationRequest>,
) -> Result<(StatusCode, Json<MoveResponse>), AppError> {
    let mut timetable = state.timetable.lock().await;

    let transition = timetable.set_duration(id, payload.minutes)?;
    let outcome = timetable::apply(&mut timetable, state.store.as_ref(), transition).await?;

    respond(&timetable, id, outcome)
}
