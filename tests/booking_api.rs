mod common;

use axum::http::StatusCode;
use common::{app, app_with_store, call, empty_request, json_request};
use serde_json::json;
use std::sync::Arc;

use seat_booking::booking::ledger::LEDGER_KEY;
use seat_booking::store::{FileStore, KeyValueStore, MemoryStore};

async fn start(app: &axum::Router, name: &str, quantity: u32) -> (StatusCode, serde_json::Value) {
    call(
        app,
        json_request("POST", "/api/booking/start", json!({ "name": name, "quantity": quantity })),
    )
    .await
}

async fn select(app: &axum::Router, seat: &str) -> (StatusCode, serde_json::Value) {
    call(app, json_request("PATCH", "/api/seats/select", json!({ "seat_id": seat }))).await
}

fn status_of(map: &serde_json::Value, seat: &str) -> String {
    map["seats"]
        .as_array()
        .expect("seats")
        .iter()
        .find(|s| s["id"] == seat)
        .map(|s| s["status"].as_str().unwrap_or_default().to_string())
        .expect("seat present")
}

#[tokio::test]
async fn full_booking_scenario() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with_store(store.clone()).await;

    let (status, map) = call(&app, empty_request("GET", "/api/seats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(map["phase"], "LOCKED");
    assert_eq!(map["seats"].as_array().unwrap().len(), 120);

    let (status, map) = start(&app, "  Lan ", 2).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(map["phase"], "SELECTING");
    assert_eq!(map["form"]["name"], "Lan");

    let (_, map) = select(&app, "A1").await;
    assert_eq!(map["selected"], json!(["A1"]));
    let (_, map) = select(&app, "A2").await;
    assert_eq!(map["selected"], json!(["A1", "A2"]));
    assert_eq!(status_of(&map, "A2"), "SELECTED");

    let (status, body) = select(&app, "A3").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (_, map) = call(&app, empty_request("GET", "/api/seats")).await;
    assert_eq!(map["selected"], json!(["A1", "A2"]));

    let (status, body) = call(&app, empty_request("POST", "/api/bookings")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["booking"],
        json!({ "name": "Lan", "seats": ["A1", "A2"], "quantity": 2 })
    );

    let (_, map) = call(&app, empty_request("GET", "/api/seats")).await;
    assert_eq!(map["phase"], "LOCKED");
    assert_eq!(map["selected"], json!([]));
    assert_eq!(map["form"], json!({ "name": "", "quantity": 0 }));
    assert_eq!(status_of(&map, "A1"), "RESERVED");
    assert_eq!(status_of(&map, "A2"), "RESERVED");
    assert_eq!(status_of(&map, "A3"), "EMPTY");

    let stored = store.get(LEDGER_KEY).await.unwrap().expect("ledger persisted");
    assert_eq!(stored, r#"[{"name":"Lan","seats":["A1","A2"],"quantity":2}]"#);
}

#[tokio::test]
async fn selecting_before_start_is_rejected() {
    let app = app().await;
    let (status, body) = select(&app, "A1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("before selecting"));
}

#[tokio::test]
async fn start_with_missing_fields_returns_notice() {
    let app = app().await;
    let (status, body) = call(&app, json_request("POST", "/api/booking/start", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = start(&app, "Lan", 0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_positive_or_garbled_quantity_returns_notice() {
    let app = app().await;
    for quantity in [json!(-1), json!("abc"), json!(2.5), json!(null)] {
        let (status, body) = call(
            &app,
            json_request("POST", "/api/booking/start", json!({ "name": "Lan", "quantity": quantity })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "quantity {}", quantity);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("number of seats"));
    }

    let (_, map) = call(&app, empty_request("GET", "/api/seats")).await;
    assert_eq!(map["phase"], "LOCKED");
}

#[tokio::test]
async fn quantity_as_form_string_is_accepted() {
    let app = app().await;
    let (status, map) = call(
        &app,
        json_request("POST", "/api/booking/start", json!({ "name": "Lan", "quantity": " 2 " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(map["phase"], "SELECTING");
    assert_eq!(map["form"]["quantity"], 2);
}

#[tokio::test]
async fn confirm_with_nothing_selected_does_not_touch_ledger() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with_store(store.clone()).await;
    start(&app, "Lan", 2).await;

    let (status, _) = call(&app, empty_request("POST", "/api/bookings")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call(&app, empty_request("GET", "/api/bookings")).await;
    assert_eq!(body["count"], 0);
    assert_eq!(store.get(LEDGER_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn release_unknown_seat_is_a_no_op() {
    let app = app().await;
    start(&app, "Lan", 2).await;
    select(&app, "B1").await;

    let (status, map) = call(
        &app,
        json_request("PATCH", "/api/seats/release", json!({ "seat_id": "C9" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(map["selected"], json!(["B1"]));

    let (_, map) = call(
        &app,
        json_request("PATCH", "/api/seats/release", json!({ "seat_id": "B1" })),
    )
    .await;
    assert_eq!(map["selected"], json!([]));
}

#[tokio::test]
async fn clear_history_makes_seats_selectable_again() {
    let store = Arc::new(MemoryStore::with_entry(
        LEDGER_KEY,
        r#"[{"name":"Minh","seats":["D4"],"quantity":1}]"#,
    ));
    let app = app_with_store(store.clone()).await;
    start(&app, "Lan", 1).await;

    let (status, _) = select(&app, "D4").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(&app, empty_request("DELETE", "/api/bookings")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.get(LEDGER_KEY).await.unwrap(), None);

    let (status, map) = select(&app, "D4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(status_of(&map, "D4"), "SELECTED");
}

#[tokio::test]
async fn corrupt_history_starts_empty() {
    let store = Arc::new(MemoryStore::with_entry(LEDGER_KEY, "definitely not json"));
    let app = app_with_store(store).await;

    let (_, body) = call(&app, empty_request("GET", "/api/bookings")).await;
    assert_eq!(body["bookings"], json!([]));
    assert_eq!(body["reserved"], json!([]));
}

#[tokio::test]
async fn history_survives_restart_on_file_store() {
    let dir = tempfile::tempdir().unwrap();

    {
        let app = app_with_store(Arc::new(FileStore::new(dir.path()))).await;
        start(&app, "Lan", 2).await;
        select(&app, "E5").await;
        select(&app, "E6").await;
        let (status, _) = call(&app, empty_request("POST", "/api/bookings")).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let app = app_with_store(Arc::new(FileStore::new(dir.path()))).await;
    let (_, body) = call(&app, empty_request("GET", "/api/bookings")).await;
    assert_eq!(body["reserved"], json!(["E5", "E6"]));

    let (_, map) = call(&app, empty_request("GET", "/api/seats")).await;
    assert_eq!(status_of(&map, "E5"), "RESERVED");

    call(&app, empty_request("DELETE", "/api/bookings")).await;
    let app = app_with_store(Arc::new(FileStore::new(dir.path()))).await;
    let (_, map) = call(&app, empty_request("GET", "/api/seats")).await;
    assert!(map["seats"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["status"] == "EMPTY"));
}
