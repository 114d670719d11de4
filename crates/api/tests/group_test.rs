
use axum::http::StatusCode;
use commonslot_core::models::{FreeSlot, availability::FreeSlotsResponse};
use commonslot_db::mock::MockGroupDirectory;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use test_utils::*;

fn nine_to_five(meeting_minutes: i64) -> Value {
    json!({
        "date": "2024-11-10",
        "start_hour": 9,
        "end_hour": 17,
        "meeting_minutes": meeting_minutes,
    })
}

fn morning_calendars() -> commonslot_db::mock::MockEventStore {
    calendars(&[
        ("alice", vec![busy(9, 0, 10, 0)]),
        ("bob", vec![busy(10, 30, 11, 0)]),
        ("carol", vec![busy(9, 30, 10, 30)]),
    ])
}

#[test_log::test(tokio::test)]
async fn test_available_slot_for_group() {
    let group_id = Uuid::new_v4();
    let server = test_server(
        morning_calendars(),
        directory(group_id, &["alice", "bob", "carol"]),
    );

    let response = server
        .post(&format!("/api/groups/{}/available-slot", group_id))
        .json(&nine_to_five(60))
        .await;

    response.assert_status_ok();
    let slot: FreeSlot = response.json();
    assert_eq!(slot, FreeSlot::new(at(11, 0), at(12, 0)));
    assert_eq!(slot.duration_minutes, 60);
}

#[test_log::test(tokio::test)]
async fn test_available_slot_ignores_body_member_ids() {
    let group_id = Uuid::new_v4();
    let server = test_server(
        calendars(&[("alice", vec![busy(9, 0, 12, 0)])]),
        directory(group_id, &["alice"]),
    );
    let mut body = nine_to_five(30);
    body["member_ids"] = json!(["mallory"]);

    let response = server
        .post(&format!("/api/groups/{}/available-slot", group_id))
        .json(&body)
        .await;

    let slot: FreeSlot = response.json();
    assert_eq!(slot.start, at(12, 0));
}

#[test_log::test(tokio::test)]
async fn test_no_available_slot_is_not_found() {
    let group_id = Uuid::new_v4();
    let server = test_server(
        calendars(&[("alice", vec![busy(9, 0, 17, 0)])]),
        directory(group_id, &["alice", "bob"]),
    );

    let response = server
        .post(&format!("/api/groups/{}/available-slot", group_id))
        .json(&nine_to_five(30))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Resource not found: No available time slot found for all members" })
    );
}

#[test_log::test(tokio::test)]
async fn test_unknown_group_is_not_found() {
    let server = test_server(untouched_store(), empty_directory());
    let group_id = Uuid::new_v4();

    let response = server
        .post(&format!("/api/groups/{}/available-slot", group_id))
        .json(&nine_to_five(30))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        format!("Resource not found: Group with ID {} not found", group_id)
    );
}

#[test_log::test(tokio::test)]
async fn test_group_without_members_is_rejected() {
    let group_id = Uuid::new_v4();
    let server = test_server(untouched_store(), directory(group_id, &[]));

    let response = server
        .post(&format!("/api/groups/{}/free-slots", group_id))
        .json(&nine_to_five(30))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_directory_failure_is_internal_error() {
    let mut failing = MockGroupDirectory::new();
    failing
        .expect_group_members()
        .returning(|_| Err(eyre::eyre!("connection refused")));
    let server = test_server(untouched_store(), failing);

    let response = server
        .post(&format!("/api/groups/{}/free-slots", Uuid::new_v4()))
        .json(&nine_to_five(30))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_free_slots_for_group() {
    let group_id = Uuid::new_v4();
    let server = test_server(
        calendars(&[
            ("alice", vec![busy(10, 0, 11, 0), busy(15, 0, 16, 0)]),
            ("bob", vec![busy(12, 0, 12, 30)]),
        ]),
        directory(group_id, &["alice", "bob"]),
    );

    let response = server
        .post(&format!("/api/groups/{}/free-slots", group_id))
        .json(&nine_to_five(45))
        .await;

    response.assert_status_ok();
    let body: FreeSlotsResponse = response.json();
    assert_eq!(
        body.slots,
        vec![
            FreeSlot::new(at(9, 0), at(10, 0)),
            FreeSlot::new(at(11, 0), at(12, 0)),
            FreeSlot::new(at(12, 30), at(15, 0)),
            FreeSlot::new(at(16, 0), at(17, 0)),
        ]
    );
}

#[test_log::test(tokio::test)]
async fn test_invalid_window_is_bad_request() {
    let group_id = Uuid::new_v4();
    let server = test_server(untouched_store(), directory(group_id, &["alice"]));
    let mut body = nine_to_five(30);
    body["end_hour"] = json!(8);

    let response = server
        .post(&format!("/api/groups/{}/available-slot", group_id))
        .json(&body)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid search window"));
}

#[test_log::test(tokio::test)]
async fn test_invalid_window_skips_the_directory() {
    let mut directory = MockGroupDirectory::new();
    directory.expect_group_members().never();
    let server = test_server(untouched_store(), directory);
    let mut body = nine_to_five(30);
    body["step_minutes"] = json!(0);

    let response = server
        .post(&format!("/api/groups/{}/free-slots", Uuid::new_v4()))
        .json(&body)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_unknown_timezone_is_bad_request() {
    let group_id = Uuid::new_v4();
    let server = test_server(untouched_store(), directory(group_id, &["alice"]));
    let mut body = nine_to_five(30);
    body["timezone"] = json!("Mars/Olympus_Mons");

    let response = server
        .post(&format!("/api/groups/{}/available-slot", group_id))
        .json(&body)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_window_in_member_timezone() {
    let group_id = Uuid::new_v4();
    // 09:00 in Berlin on 2024-11-10 is 08:00 UTC.
    let server = test_server(
        calendars(&[("alice", vec![busy(8, 0, 9, 0)])]),
        directory(group_id, &["alice"]),
    );
    let mut body = nine_to_five(30);
    body["timezone"] = json!("Europe/Berlin");

    let response = server
        .post(&format!("/api/groups/{}/available-slot", group_id))
        .json(&body)
        .await;

    let slot: FreeSlot = response.json();
    assert_eq!(slot, FreeSlot::new(at(9, 0), at(9, 30)));
}

#[test_log::test(tokio::test)]
async fn test_collection_failure_is_bad_gateway() {
    let group_id = Uuid::new_v4();
    let mut store = commonslot_db::mock::MockEventStore::new();
    store
        .expect_query_events_for_member()
        .returning(|member_id, _| match member_id {
            "bob" => Err(eyre::eyre!("calendar offline")),
            _ => Ok(vec![]),
        });
    let server = test_server(store, directory(group_id, &["alice", "bob"]));

    let response = server
        .post(&format!("/api/groups/{}/available-slot", group_id))
        .json(&nine_to_five(30))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("bob"));
}

#[test_log::test(tokio::test)]
async fn test_busy_timelines_for_group() {
    let group_id = Uuid::new_v4();
    let server = test_server(
        morning_calendars(),
        directory(group_id, &["alice", "bob", "carol"]),
    );

    let response = server
        .get(&format!("/api/groups/{}/busy", group_id))
        .add_query_param("from", "2024-11-10T00:00:00Z")
        .add_query_param("to", "2024-11-11T00:00:00Z")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["combined"],
        json!([{ "start": "2024-11-10T09:00:00Z", "end": "2024-11-10T11:00:00Z" }])
    );
    assert_eq!(
        body["members"]["bob"],
        json!([{ "start": "2024-11-10T10:30:00Z", "end": "2024-11-10T11:00:00Z" }])
    );
}

#[test_log::test(tokio::test)]
async fn test_busy_with_half_open_range_is_rejected() {
    let group_id = Uuid::new_v4();
    let server = test_server(untouched_store(), directory(group_id, &["alice"]));

    let response = server
        .get(&format!("/api/groups/{}/busy", group_id))
        .add_query_param("from", "2024-11-10T00:00:00Z")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
