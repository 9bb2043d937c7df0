//! Integration tests for the event CRUD endpoints

use axum::http::{Method, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use crate::helpers::{event_payload, event_payload_with_capacity, id_of, ids_of, morning_run, TestApp};

#[tokio::test]
async fn test_create_event_returns_created_event() {
    let app = TestApp::new();

    let response = app.post("/events", morning_run()).await;

    assert_eq!(response.status, StatusCode::CREATED);
    let event = &response.body;
    assert_eq!(event["id"], 1);
    assert_eq!(event["activity"], "Morning Run");
    assert_eq!(event["date"], "2024-05-01T10:00:00.000Z");
    assert_eq!(event["location"], "Riverside Park");
    assert_eq!(event["hostInstagram"], "runner_ana");
    assert!(event["capacity"].is_null());
    assert_eq!(event["attendees"], json!(["runner_ana"]));
    assert_eq!(event["currentAttendees"], 1);
}

#[tokio::test]
async fn test_create_event_normalizes_date() {
    let app = TestApp::new();

    let event = app
        .create_event(event_payload("Swim", "2024-05-01T12:30:00+02:00", "Lido", "ana"))
        .await;

    assert_eq!(event["date"], "2024-05-01T10:30:00.000Z");
}

#[tokio::test]
async fn test_create_event_missing_fields() {
    let app = TestApp::new();

    let response = app
        .post("/events", json!({ "activity": "Run", "date": "2024-05-01T10:00:00Z" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error(),
        "activity, date, location, and instagramUsername are required"
    );
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_create_event_invalid_date() {
    let app = TestApp::new();

    let response = app
        .post("/events", event_payload("Run", "32/13/2024", "Park", "ana"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "date must be a valid ISO 8601 date string");
}

#[tokio::test]
async fn test_create_event_invalid_capacity() {
    let app = TestApp::new();

    let response = app
        .post("/events", event_payload_with_capacity("Run", "2024-05-01", 0))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "capacity must be a positive integer");
}

#[tokio::test]
async fn test_create_event_rejects_non_object_body() {
    let app = TestApp::new();

    let not_json = app
        .request_raw(Method::POST, "/events", Some("activity=Run".to_string()))
        .await;
    assert_eq!(not_json.status, StatusCode::BAD_REQUEST);
    assert_eq!(not_json.error(), "request body must be a JSON object");

    let array = app.post("/events", json!(["Run", "2024-05-01"])).await;
    assert_eq!(array.status, StatusCode::BAD_REQUEST);
    assert_eq!(array.error(), "request body must be a JSON object");
}

#[tokio::test]
async fn test_get_event_round_trips_date() {
    let app = TestApp::new();
    let created = app.create_event(morning_run()).await;

    let response = app.get(&format!("/events/{}", id_of(&created))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, created);

    let date = response.body["date"].as_str().unwrap();
    let parsed: DateTime<Utc> = DateTime::parse_from_rfc3339(date).unwrap().with_timezone(&Utc);
    assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
}

#[tokio::test]
async fn test_get_event_invalid_and_missing_ids() {
    let app = TestApp::new();

    let invalid = app.get("/events/abc").await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.error(), "Invalid event id");

    let missing = app.get("/events/404").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error(), "Event not found");
}

#[tokio::test]
async fn test_list_events_filters_and_sorts() {
    let app = TestApp::new();
    let late_run = app
        .create_event(event_payload("Evening run club", "2024-05-01T23:30:00Z", "Harbor", "bo"))
        .await;
    let yoga = app
        .create_event(event_payload("Yoga", "2024-05-01T08:00:00Z", "Central Park", "cy"))
        .await;
    let early_run = app
        .create_event(event_payload("Morning Run", "2024-05-01T00:00:00Z", "Central Park", "ana"))
        .await;
    let next_day = app
        .create_event(event_payload("Trail Run", "2024-05-02T06:00:00Z", "Hills", "dee"))
        .await;

    let all = app.get("/events").await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(
        ids_of(&all.body),
        vec![id_of(&early_run), id_of(&yoga), id_of(&late_run), id_of(&next_day)]
    );

    let runs = app.get("/events?activity=run").await;
    assert_eq!(
        ids_of(&runs.body),
        vec![id_of(&early_run), id_of(&late_run), id_of(&next_day)]
    );

    let may_first = app.get("/events?date=2024-05-01").await;
    assert_eq!(
        ids_of(&may_first.body),
        vec![id_of(&early_run), id_of(&yoga), id_of(&late_run)]
    );

    let combined = app.get("/events?activity=RUN&location=central&date=2024-05-01").await;
    assert_eq!(ids_of(&combined.body), vec![id_of(&early_run)]);

    let none = app.get("/events?location=nowhere").await;
    assert_eq!(none.status, StatusCode::OK);
    assert_eq!(none.body, json!([]));
}

#[tokio::test]
async fn test_list_events_repeated_and_unknown_keys() {
    let app = TestApp::new();
    let run = app.create_event(morning_run()).await;
    app.create_event(event_payload("Yoga", "2024-05-01T08:00:00Z", "Pier", "cy"))
        .await;

    let repeated = app.get("/events?activity=run&activity=yoga&page=2").await;
    assert_eq!(repeated.status, StatusCode::OK);
    assert_eq!(ids_of(&repeated.body), vec![id_of(&run)]);

    let encoded = app.get("/events?location=riverside%20park").await;
    assert_eq!(encoded.status, StatusCode::OK);
    assert_eq!(ids_of(&encoded.body), vec![id_of(&run)]);
}

#[tokio::test]
async fn test_create_event_accepts_other_iso_forms() {
    let app = TestApp::new();

    let basic_offset = app
        .create_event(event_payload("Swim", "2024-05-01T10:00:00+0200", "Lido", "ana"))
        .await;
    assert_eq!(basic_offset["date"], "2024-05-01T08:00:00.000Z");

    let month = app
        .create_event(event_payload("Book Club", "2024-05", "Library", "bo"))
        .await;
    assert_eq!(month["date"], "2024-05-01T00:00:00.000Z");

    let precise = app
        .create_event(event_payload("Sprint", "2024-05-01T10:00:00.123456Z", "Track", "cy"))
        .await;
    assert_eq!(precise["date"], "2024-05-01T10:00:00.123Z");
}

#[tokio::test]
async fn test_integral_ids_and_capacities() {
    let app = TestApp::new();
    let mut payload = morning_run();
    payload["capacity"] = json!(5.0);
    let event = app.create_event(payload).await;
    assert_eq!(event["capacity"], 5);

    let response = app.get(&format!("/events/{}.0", id_of(&event))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, event);
}

#[tokio::test]
async fn test_list_events_includes_derived_count() {
    let app = TestApp::new();
    let event = app.create_event(morning_run()).await;
    app.join(id_of(&event), "bo").await;

    let listed = app.get("/events").await;
    assert_eq!(listed.body[0]["currentAttendees"], 2);
}

#[tokio::test]
async fn test_update_event_partial() {
    let app = TestApp::new();
    let event = app.create_event(morning_run()).await;
    let uri = format!("/events/{}", id_of(&event));

    let response = app
        .put(&uri, json!({ "location": "Lakeside", "date": "2024-06-01T07:00:00Z" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["location"], "Lakeside");
    assert_eq!(response.body["date"], "2024-06-01T07:00:00.000Z");
    assert_eq!(response.body["activity"], "Morning Run");
    assert_eq!(response.body["attendees"], json!(["runner_ana"]));
}

#[tokio::test]
async fn test_update_event_host_does_not_touch_attendees() {
    let app = TestApp::new();
    let event = app.create_event(morning_run()).await;

    let response = app
        .put(&format!("/events/{}", id_of(&event)), json!({ "instagramUsername": "new_host" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["hostInstagram"], "new_host");
    assert_eq!(response.body["attendees"], json!(["runner_ana"]));
}

#[tokio::test]
async fn test_update_event_validation() {
    let app = TestApp::new();
    let event = app.create_event(morning_run()).await;
    let uri = format!("/events/{}", id_of(&event));

    let empty = app.put(&uri, json!({})).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.error(), "no fields to update");

    let blank = app.put(&uri, json!({ "activity": "" })).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.error(), "activity cannot be empty");

    let bad_date = app.put(&uri, json!({ "date": "tomorrow" })).await;
    assert_eq!(bad_date.status, StatusCode::BAD_REQUEST);

    // Nothing was applied
    assert_eq!(app.get(&uri).await.body, event);
}

#[tokio::test]
async fn test_update_capacity_rules() {
    let app = TestApp::new();
    let event = app
        .create_event(event_payload_with_capacity("Dinner", "2024-05-03T19:00:00Z", 4))
        .await;
    let id = id_of(&event);
    let uri = format!("/events/{}", id);
    app.join(id, "ana").await;
    app.join(id, "bo").await;

    let too_small = app.put(&uri, json!({ "capacity": 2 })).await;
    assert_eq!(too_small.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        too_small.error(),
        "capacity cannot be less than current attendee count (3)"
    );
    assert_eq!(app.get(&uri).await.body["capacity"], 4);

    let exact = app.put(&uri, json!({ "capacity": 3 })).await;
    assert_eq!(exact.status, StatusCode::OK);
    assert_eq!(exact.body["capacity"], 3);

    let unlimited = app.put(&uri, json!({ "capacity": null })).await;
    assert_eq!(unlimited.status, StatusCode::OK);
    assert!(unlimited.body["capacity"].is_null());
}

#[tokio::test]
async fn test_update_missing_event() {
    let app = TestApp::new();

    let response = app.put("/events/77", json!({ "activity": "Chess" })).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Event not found");
}

#[tokio::test]
async fn test_delete_event() {
    let app = TestApp::new();
    let event = app.create_event(morning_run()).await;
    let uri = format!("/events/{}", id_of(&event));

    let first = app.delete(&uri).await;
    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assert!(first.body.is_null());

    let second = app.delete(&uri).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);

    assert_eq!(app.get(&uri).await.status, StatusCode::NOT_FOUND);

    let invalid = app.delete("/events/one").await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.error(), "Invalid event id");
}
