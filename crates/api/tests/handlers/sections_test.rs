use axum::http::StatusCode;
use classgrid_core::{
    conflict::Rejection,
    models::timetable::{MoveResponse, SectionView},
    timetable::MovePhase,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{TestContext, record};

#[tokio::test]
async fn test_list_sections() {
    let server = TestContext::with_sections(vec![
        record(1, "Monday 08:00-09:00", None),
        record(2, "TBD", Some(120)),
    ])
    .server()
    .await;

    let response = server.get("/api/sections").await;

    response.assert_status_ok();
    let sections: Vec<SectionView> = response.json();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].schedule, "Monday 08:00-09:00");
    assert_eq!(sections[1].schedule, "TBD");
    assert_eq!(sections[1].duration_minutes, 120);
}

#[tokio::test]
async fn test_get_section_not_found() {
    let server = TestContext::with_sections(vec![record(1, "TBD", None)])
        .server()
        .await;

    let response = server.get("/api/sections/99").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Resource not found: Section with ID 99 not found");
}

#[tokio::test]
async fn test_get_section() {
    let server = TestContext::with_sections(vec![record(7, "Thursday 13:30-15:00", None)])
        .server()
        .await;

    let response = server.get("/api/sections/7").await;

    response.assert_status_ok();
    let section: SectionView = response.json();
    assert_eq!(section.id, 7);
    assert_eq!(section.duration_minutes, 90);
}

#[tokio::test]
async fn test_update_duration_of_placed_section() {
    let mut ctx = TestContext::with_sections(vec![record(1, "Tuesday 10:00-11:00", None)]);
    ctx.store.expect_on_schedule_update().never();
    ctx.store
        .expect_on_section_update()
        .withf(|section| {
            section.id == 1
                && section.duration_minutes == Some(120)
                && section.schedule == "Tuesday 10:00-12:00"
        })
        .times(1)
        .returning(|_| Ok(()));
    let server = ctx.server().await;

    let response = server
        .put("/api/sections/1/duration")
        .json(&json!({ "minutes": 120 }))
        .await;

    response.assert_status_ok();
    let body: MoveResponse = response.json();
    assert_eq!(body.phase, MovePhase::Committed);
    assert_eq!(body.section.schedule, "Tuesday 10:00-12:00");
}

#[tokio::test]
async fn test_update_duration_into_neighbour_is_rejected() {
    let mut ctx = TestContext::with_sections(vec![
        record(1, "Tuesday 10:00-11:00", None),
        record(2, "Tuesday 11:00-12:00", None),
    ]);
    ctx.store.expect_on_schedule_update().never();
    ctx.store.expect_on_section_update().never();
    let server = ctx.server().await;

    let response = server
        .put("/api/sections/1/duration")
        .json(&json!({ "minutes": 90 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: MoveResponse = response.json();
    assert_eq!(body.section.duration_minutes, 60);
    assert_eq!(body.rejection, Some(Rejection::Conflict { with: vec![2] }));
}

#[tokio::test]
async fn test_update_duration_rejects_invalid_length() {
    let server = TestContext::with_sections(vec![record(1, "TBD", None)])
        .server()
        .await;

    let response = server
        .put("/api/sections/1/duration")
        .json(&json!({ "minutes": 45 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_failed_duration_update_keeps_old_length() {
    let mut ctx = TestContext::with_sections(vec![record(1, "Tuesday 10:00-11:00", None)]);
    ctx.store
        .expect_on_section_update()
        .times(1)
        .returning(|_| Err(eyre::eyre!("backend unavailable")));
    let server = ctx.server().await;

    let response = server
        .put("/api/sections/1/duration")
        .json(&json!({ "minutes": 120 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let section: SectionView = server.get("/api/sections/1").await.json();
    assert_eq!(section.duration_minutes, 60);
    assert_eq!(section.schedule, "Tuesday 10:00-11:00");
}
