use axum::http::StatusCode;
use classgrid_core::{
    conflict::Rejection,
    grid::Day,
    models::timetable::{MoveResponse, TimetableView},
    timetable::MovePhase,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{TestContext, record};

#[tokio::test]
async fn test_get_timetable() {
    let server = TestContext::with_sections(vec![
        record(1, "Sunday 09:00-10:30", None),
        record(2, "??", None),
    ])
    .server()
    .await;

    let response = server.get("/api/timetable").await;

    response.assert_status_ok();
    let view: TimetableView = response.json();
    assert_eq!(view.days[0], Day::Sunday);
    assert_eq!(view.times.len(), 29);
    assert_eq!(view.duration_options.len(), 12);
    assert_eq!(view.placed.len(), 1);
    assert_eq!(view.placed[0].section.schedule, "Sunday 09:00-10:30");
    assert_eq!(view.unscheduled.len(), 1);
    assert_eq!(view.unscheduled[0].duration_minutes, 60);
}

#[tokio::test]
async fn test_move_commits_and_persists() {
    let mut ctx = TestContext::with_sections(vec![record(1, "TBD", Some(60))]);
    ctx.store
        .expect_on_schedule_update()
        .withf(|id, update| *id == 1 && update.schedule_string() == "Sunday 09:00-10:00")
        .times(1)
        .returning(|_, _| Ok(()));
    let server = ctx.server().await;

    let response = server
        .post("/api/timetable/moves")
        .json(&json!({
            "section_id": 1,
            "source": { "kind": "unscheduled" },
            "destination": { "kind": "slot", "day": "Sunday", "start": "09:00" }
        }))
        .await;

    response.assert_status_ok();
    let body: MoveResponse = response.json();
    assert_eq!(body.phase, MovePhase::Committed);
    assert_eq!(body.section.schedule, "Sunday 09:00-10:00");
    assert_eq!(body.rejection, None);
}

#[tokio::test]
async fn test_conflicting_move_returns_conflict_without_persisting() {
    let mut ctx = TestContext::with_sections(vec![
        record(1, "Sunday 09:00-10:00", None),
        record(2, "TBD", Some(90)),
    ]);
    ctx.store.expect_on_schedule_update().never();
    let server = ctx.server().await;

    let response = server
        .post("/api/timetable/moves")
        .json(&json!({
            "section_id": 2,
            "source": { "kind": "unscheduled" },
            "destination": { "kind": "slot", "day": "Sunday", "start": "09:30" }
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: MoveResponse = response.json();
    assert_eq!(body.phase, MovePhase::RolledBack);
    assert_eq!(body.section.schedule, "TBD");
    assert_eq!(body.rejection, Some(Rejection::Conflict { with: vec![1] }));
}

#[tokio::test]
async fn test_out_of_grid_move_is_rejected() {
    let mut ctx = TestContext::with_sections(vec![record(1, "TBD", Some(360))]);
    ctx.store.expect_on_schedule_update().never();
    let server = ctx.server().await;

    let response = server
        .post("/api/timetable/moves")
        .json(&json!({
            "section_id": 1,
            "source": { "kind": "unscheduled" },
            "destination": { "kind": "slot", "day": "Monday", "start": "16:30" }
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: MoveResponse = response.json();
    assert!(matches!(body.rejection, Some(Rejection::OutOfGrid { .. })));
}

#[tokio::test]
async fn test_stale_source_is_conflict_error() {
    let server = TestContext::with_sections(vec![record(1, "Sunday 09:00-10:00", None)])
        .server()
        .await;

    let response = server
        .post("/api/timetable/moves")
        .json(&json!({
            "section_id": 1,
            "source": { "kind": "slot", "day": "Monday", "start": "09:00" },
            "destination": { "kind": "unscheduled" }
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Stale move"));
}

#[tokio::test]
async fn test_failed_persistence_restores_board() {
    let mut ctx = TestContext::with_sections(vec![record(1, "Sunday 09:00-10:00", None)]);
    ctx.store
        .expect_on_schedule_update()
        .times(1)
        .returning(|_, _| Err(eyre::eyre!("backend unavailable")));
    let server = ctx.server().await;

    let response = server
        .post("/api/timetable/moves")
        .json(&json!({
            "section_id": 1,
            "source": { "kind": "slot", "day": "Sunday", "start": "09:00" },
            "destination": { "kind": "unscheduled" }
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);

    let view: TimetableView = server.get("/api/timetable").await.json();
    assert_eq!(view.placed.len(), 1);
    assert_eq!(view.placed[0].section.schedule, "Sunday 09:00-10:00");
}

#[tokio::test]
async fn test_reload_rebuilds_from_store() {
    let mut ctx = TestContext::new();
    let mut loads = 0;
    ctx.store.expect_load_sections().times(2).returning(move || {
        loads += 1;
        if loads == 1 {
            Ok(vec![record(1, "TBD", None)])
        } else {
            Ok(vec![record(1, "Friday 10:00-11:00", None), record(2, "TBD", None)])
        }
    });
    let server = ctx.server().await;

    let response = server.post("/api/timetable/reload").await;

    response.assert_status_ok();
    let view: TimetableView = response.json();
    assert_eq!(view.placed.len(), 1);
    assert_eq!(view.placed[0].day, Day::Friday);
    assert_eq!(view.unscheduled.len(), 1);
}
