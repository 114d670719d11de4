
use axum::http::StatusCode;
use commonslot_core::models::{FreeSlot, availability::FreeSlotsResponse};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use test_utils::*;

#[test_log::test(tokio::test)]
async fn test_slot_for_explicit_members() {
    let server = test_server(
        calendars(&[
            ("alice", vec![busy(9, 0, 10, 0)]),
            ("bob", vec![busy(10, 30, 11, 0)]),
            ("carol", vec![busy(9, 30, 10, 30)]),
        ]),
        empty_directory(),
    );

    let response = server
        .post("/api/availability/slot")
        .json(&json!({
            "member_ids": ["alice", "bob", "carol"],
            "date": "2024-11-10",
            "start_hour": 9,
            "end_hour": 17,
            "meeting_minutes": 60,
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<FreeSlot>(), FreeSlot::new(at(11, 0), at(12, 0)));
}

#[test_log::test(tokio::test)]
async fn test_custom_step_changes_candidate_starts() {
    let server = test_server(
        calendars(&[("alice", vec![busy(9, 0, 9, 10)])]),
        empty_directory(),
    );
    let body = |step: i64| {
        json!({
            "member_ids": ["alice"],
            "date": "2024-11-10",
            "start_hour": 9,
            "end_hour": 17,
            "meeting_minutes": 30,
            "step_minutes": step,
        })
    };

    let default_step = server.post("/api/availability/slot").json(&body(STEP_MINUTES)).await;
    let fine_step = server.post("/api/availability/slot").json(&body(10)).await;

    assert_eq!(default_step.json::<FreeSlot>().start, at(9, 30));
    assert_eq!(fine_step.json::<FreeSlot>().start, at(9, 10));
}

#[test_log::test(tokio::test)]
async fn test_gaps_for_explicit_members() {
    let server = test_server(
        calendars(&[("alice", vec![busy(9, 0, 10, 0)]), ("bob", vec![busy(10, 15, 17, 0)])]),
        empty_directory(),
    );

    let response = server
        .post("/api/availability/gaps")
        .json(&json!({
            "member_ids": ["alice", "bob"],
            "date": "2024-11-10",
            "start_hour": 9,
            "end_hour": 17,
            "meeting_minutes": 15,
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<FreeSlotsResponse>().slots,
        vec![FreeSlot::new(at(10, 0), at(10, 15))]
    );
}

#[test_log::test(tokio::test)]
async fn test_missing_member_ids_is_bad_request() {
    let server = test_server(untouched_store(), empty_directory());

    let response = server
        .post("/api/availability/gaps")
        .json(&json!({
            "date": "2024-11-10",
            "start_hour": 9,
            "end_hour": 17,
            "meeting_minutes": 30,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Validation error: At least one member id must be provided"
    );
}

#[test_log::test(tokio::test)]
async fn test_invalid_stored_event_is_unprocessable() {
    let server = test_server(
        calendars(&[("alice", vec![busy(12, 0, 11, 0)])]),
        empty_directory(),
    );

    let response = server
        .post("/api/availability/slot")
        .json(&json!({
            "member_ids": ["alice"],
            "date": "2024-11-10",
            "start_hour": 9,
            "end_hour": 17,
            "meeting_minutes": 30,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test_log::test(tokio::test)]
async fn test_out_of_range_meeting_minutes_is_bad_request() {
    let server = test_server(untouched_store(), empty_directory());

    let response = server
        .post("/api/availability/slot")
        .json(&json!({
            "member_ids": ["alice"],
            "date": "2024-11-10",
            "start_hour": 9,
            "end_hour": 17,
            "meeting_minutes": i64::MAX,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("meeting_minutes"));
}

#[test_log::test(tokio::test)]
async fn test_meeting_longer_than_the_window_is_not_found() {
    let server = test_server(calendars(&[]), empty_directory());

    let response = server
        .post("/api/availability/slot")
        .json(&json!({
            "member_ids": ["alice"],
            "date": "2024-11-10",
            "start_hour": 9,
            "end_hour": 17,
            "meeting_minutes": 1_000_000_000_000i64,
            "step_minutes": 1_000_000_000_000i64,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_health_and_version() {
    let server = test_server(untouched_store(), empty_directory());

    let health = server.get("/health").await;
    let version = server.get("/version").await;

    health.assert_status_ok();
    assert_eq!(health.json::<Value>(), json!({ "status": "ok" }));
    assert_eq!(version.json::<Value>()["name"], "commonslot-api");
}
