//! Integration tests for joining events

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{event_payload_with_capacity, id_of, morning_run, TestApp};

#[tokio::test]
async fn test_join_event_adds_attendee() {
    let app = TestApp::new();
    let event = app.create_event(morning_run()).await;

    let response = app.join(id_of(&event), "bo_lifts").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["attendees"], json!(["runner_ana", "bo_lifts"]));
    assert_eq!(response.body["currentAttendees"], 2);
}

#[tokio::test]
async fn test_join_event_twice_conflicts() {
    let app = TestApp::new();
    let event = app.create_event(morning_run()).await;
    let id = id_of(&event);

    assert_eq!(app.join(id, "bo_lifts").await.status, StatusCode::OK);

    let again = app.join(id, "BO_LIFTS").await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.error(), "already joined");

    let host = app.join(id, "runner_ana").await;
    assert_eq!(host.status, StatusCode::CONFLICT);
    assert_eq!(host.error(), "already joined");

    let current = app.get(&format!("/events/{}", id)).await;
    assert_eq!(current.body["currentAttendees"], 2);
}

#[tokio::test]
async fn test_join_full_event() {
    let app = TestApp::new();
    let event = app
        .create_event(event_payload_with_capacity("Climbing", "2024-05-04T09:00:00Z", 2))
        .await;
    let id = id_of(&event);

    assert_eq!(app.join(id, "ana").await.status, StatusCode::OK);

    let full = app.join(id, "bo").await;
    assert_eq!(full.status, StatusCode::CONFLICT);
    assert_eq!(full.error(), "event is full");

    // Duplicates are reported before capacity
    let duplicate = app.join(id, "ana").await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.error(), "already joined");

    let current = app.get(&format!("/events/{}", id)).await;
    assert_eq!(current.body["attendees"], json!(["host_handle", "ana"]));
}

#[tokio::test]
async fn test_join_event_validation() {
    let app = TestApp::new();
    let event = app.create_event(morning_run()).await;
    let uri = format!("/events/{}/join", id_of(&event));

    let missing = app.post(&uri, json!({})).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.error(), "instagramUsername is required");

    let blank = app.post(&uri, json!({ "instagramUsername": "   " })).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let wrong_type = app.post(&uri, json!({ "instagramUsername": 42 })).await;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_join_unknown_or_invalid_event() {
    let app = TestApp::new();

    let missing = app.join(12, "ana").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error(), "Event not found");

    let invalid = app
        .post("/events/twelve/join", json!({ "instagramUsername": "ana" }))
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.error(), "Invalid event id");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_respect_capacity() {
    let app = TestApp::new();
    let event = app
        .create_event(event_payload_with_capacity("Pickup Soccer", "2024-05-05T17:00:00Z", 5))
        .await;
    let id = id_of(&event);

    let mut handles = Vec::new();
    for i in 0..12 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            app.join(id, &format!("player_{}", i)).await.status
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.expect("join task panicked"));
    }

    let accepted = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    let rejected = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!(accepted, 4);
    assert_eq!(rejected, 8);

    let current = app.get(&format!("/events/{}", id)).await;
    assert_eq!(current.body["currentAttendees"], 5);
}
