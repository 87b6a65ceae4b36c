use chrono::NaiveTime;
use classgrid_core::{
    conflict::Rejection,
    grid::Day,
    models::{section::SectionRecord, timetable::MoveResponse},
    timetable::{MoveCommand, MovePhase, Target},
};
use pretty_assertions::assert_eq;
use serde_json::{from_str, json, to_value};
use serde_test::{Token, assert_tokens};

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn test_day_tokens() {
    assert_tokens(
        &Day::Sunday,
        &[Token::UnitVariant {
            name: "Day",
            variant: "Sunday",
        }],
    );
}

#[test]
fn test_move_command_from_json() {
    let command: MoveCommand = from_str(
        r#"{
            "section_id": 3,
            "source": { "kind": "unscheduled" },
            "destination": { "kind": "slot", "day": "Tuesday", "start": "13:30" }
        }"#,
    )
    .expect("Failed to deserialize move command");

    assert_eq!(
        command,
        MoveCommand {
            section_id: 3,
            source: Target::Unscheduled,
            destination: Target::Slot {
                day: Day::Tuesday,
                start: at(13, 30),
            },
        }
    );
}

#[test]
fn test_move_command_rejects_bad_clock() {
    let result = from_str::<MoveCommand>(
        r#"{
            "section_id": 3,
            "source": { "kind": "unscheduled" },
            "destination": { "kind": "slot", "day": "Tuesday", "start": "1:30pm" }
        }"#,
    );

    assert!(result.is_err());
}

#[test]
fn test_rejection_json_shape() {
    let conflict = to_value(Rejection::Conflict { with: vec![1, 4] }).unwrap();
    let out_of_grid = to_value(Rejection::OutOfGrid {
        day: Day::Saturday,
        start: at(21, 30),
        duration_minutes: 60,
    })
    .unwrap();

    assert_eq!(conflict, json!({ "kind": "conflict", "with": [1, 4] }));
    assert_eq!(
        out_of_grid,
        json!({ "kind": "out_of_grid", "day": "Saturday", "start": "21:30", "duration_minutes": 60 })
    );
}

#[test]
fn test_section_record_defaults() {
    let record: SectionRecord = from_str(
        r#"{
            "id": 12,
            "course_id": 3,
            "name": "Piano Beginners",
            "max_capacity": 8,
            "current_enrollment": 8,
            "active": false
        }"#,
    )
    .expect("Failed to deserialize section record");

    assert_eq!(record.schedule, "");
    assert_eq!(record.duration_minutes, None);
}

#[test]
fn test_committed_move_response_omits_rejection() {
    let response: MoveResponse = from_str(
        r#"{
            "phase": "committed",
            "section": {
                "id": 1,
                "course_id": 2,
                "name": "Chess Club",
                "schedule": "Monday 10:00-11:00",
                "max_capacity": 12,
                "current_enrollment": 5,
                "active": true,
                "duration_minutes": 60
            }
        }"#,
    )
    .expect("Failed to deserialize move response");

    assert_eq!(response.phase, MovePhase::Committed);
    assert_eq!(response.rejection, None);
    assert!(to_value(&response).unwrap().get("rejection").is_none());
}
