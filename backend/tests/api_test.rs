mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use backend::api::router;
use backend::models::EntityKind;
use backend::records::InMemoryRecordClient;
use backend::services::Console;
use backend::state::AppState;
use common::{hex_id, seed, test_links, url};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> (Router, Arc<InMemoryRecordClient>) {
    let store = Arc::new(InMemoryRecordClient::new());
    seed(&store);
    let mut console = Console::new(store.clone(), test_links());
    assert_eq!(console.load_all().await, None);
    (router(AppState::new(console)), store)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _store) = test_app().await;
    let response = app
        .oneshot(empty_request("GET", "/health"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn course_list_resolves_instructor_and_room_names() {
    let (app, _store) = test_app().await;
    let response = app
        .oneshot(empty_request("GET", "/courses"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let rows = read_json(response).await;
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["title"], "Rust Basics");
    assert_eq!(rows[0]["instructor"], "Ada Lovelace");
    assert_eq!(rows[0]["room"], "Lab 1 (North)");
    assert_eq!(rows[1]["instructor"], "—");
}

#[tokio::test]
async fn enrollment_list_resolves_participant_and_course() {
    let (app, _store) = test_app().await;
    let response = app
        .oneshot(empty_request("GET", "/enrollments"))
        .await
        .expect("response");

    let rows = read_json(response).await;
    assert_eq!(rows[0]["participant"], "Grace Hopper");
    assert_eq!(rows[0]["course"], "Rust Basics");
    assert_eq!(rows[0]["paid"], true);
}

#[tokio::test]
async fn plain_collections_list_ui_records() {
    let (app, _store) = test_app().await;
    let response = app
        .oneshot(empty_request("GET", "/rooms"))
        .await
        .expect("response");

    let rooms = read_json(response).await;
    assert_eq!(
        rooms,
        json!([{
            "id": hex_id(10).as_str(),
            "name": "Lab 1",
            "building": "North",
            "capacity": 24
        }])
    );
}

#[tokio::test]
async fn get_single_record_reads_the_store() {
    let (app, _store) = test_app().await;
    let uri = format!("/instructors/{}", hex_id(1));
    let response = app
        .oneshot(empty_request("GET", &uri))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let instructor = read_json(response).await;
    assert_eq!(instructor["name"], "Ada Lovelace");
    assert_eq!(instructor["subject_area"], "Mathematics");
}

#[tokio::test]
async fn missing_store_record_is_a_gateway_error() {
    let (app, _store) = test_app().await;
    let uri = format!("/rooms/{}", hex_id(99));
    let response = app
        .oneshot(empty_request("GET", &uri))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn invalid_form_is_rejected_before_the_store() {
    let (app, store) = test_app().await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/enrollments",
            json!({ "participant": hex_id(30).as_str(), "course": "" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert_eq!(body["message"], "missing required fields: course");
    assert_eq!(store.len(EntityKind::Enrollment), 2);
}

#[tokio::test]
async fn valid_form_creates_a_record() {
    let (app, store) = test_app().await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/rooms",
            json!({ "name": "Hall", "building": "South" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let notification = read_json(response).await;
    assert_eq!(notification, json!({ "level": "success", "message": "Room created" }));
    assert_eq!(store.len(EntityKind::Room), 2);

    let listed = app
        .oneshot(empty_request("GET", "/rooms"))
        .await
        .expect("response");
    let rooms = read_json(listed).await;
    assert_eq!(rooms[1]["name"], "Hall");
    assert_eq!(rooms[1]["capacity"], 30);
}

#[tokio::test]
async fn backwards_course_dates_are_rejected() {
    let (app, store) = test_app().await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/courses",
            json!({
                "title": "Backwards",
                "start_date": "2024-05-01",
                "end_date": "2024-04-01"
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(store.len(EntityKind::Course), 2);
}

#[tokio::test]
async fn update_replaces_the_edited_record() {
    let (app, store) = test_app().await;
    let uri = format!("/participants/{}", hex_id(31));
    let response = app
        .oneshot(json_request(
            "PATCH",
            &uri,
            json!({ "name": "Edsger W. Dijkstra", "email": "ewd@example.org" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let stored = store
        .fields(EntityKind::Participant, &hex_id(31))
        .expect("stored");
    assert_eq!(stored["name"], "Edsger W. Dijkstra");
    assert_eq!(stored["email"], "ewd@example.org");
}

#[tokio::test]
async fn partial_update_keeps_fields_left_out_of_the_body() {
    let (app, store) = test_app().await;
    let uri = format!("/courses/{}", hex_id(20));
    let response = app
        .oneshot(json_request(
            "PATCH",
            &uri,
            json!({
                "title": "Rust Basics II",
                "start_date": "2024-01-01",
                "end_date": "2024-12-31"
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let stored = store.fields(EntityKind::Course, &hex_id(20)).expect("stored");
    assert_eq!(stored["titel"], "Rust Basics II");
    assert_eq!(stored["preis"], 100.0);
    assert_eq!(stored["max_teilnehmer"], 12);
    assert_eq!(stored["beschreibung"], "Ownership and borrowing");
    assert_eq!(stored["dozent"], url(EntityKind::Instructor, &hex_id(1)));
}

#[tokio::test]
async fn single_field_update_keeps_the_rest_of_the_record() {
    let (app, store) = test_app().await;
    let uri = format!("/courses/{}", hex_id(20));
    let response = app
        .oneshot(json_request("PATCH", &uri, json!({ "price": 80.0 })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let stored = store.fields(EntityKind::Course, &hex_id(20)).expect("stored");
    assert_eq!(stored["preis"], 80.0);
    assert_eq!(stored["titel"], "Rust Basics");
    assert_eq!(stored["enddatum"], "2024-12-31");
    assert_eq!(stored["raum"], url(EntityKind::Room, &hex_id(10)));
}

#[tokio::test]
async fn update_with_non_object_body_is_a_bad_request() {
    let (app, _store) = test_app().await;
    let uri = format!("/rooms/{}", hex_id(10));
    let response = app
        .oneshot(json_request("PATCH", &uri, json!(["Lab 2"])))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_of_unknown_record_is_not_found() {
    let (app, _store) = test_app().await;
    let uri = format!("/participants/{}", hex_id(77));
    let response = app
        .oneshot(json_request("PATCH", &uri, json!({ "name": "Nobody" })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let (app, store) = test_app().await;
    let uri = format!("/enrollments/{}", hex_id(40));

    let unconfirmed = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .expect("response");
    assert_eq!(unconfirmed.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.len(EntityKind::Enrollment), 2);

    let confirmed = app
        .oneshot(empty_request("DELETE", &format!("{}?confirm=true", uri)))
        .await
        .expect("response");
    assert_eq!(confirmed.status(), StatusCode::OK);
    assert_eq!(store.len(EntityKind::Enrollment), 1);
    assert!(store.fields(EntityKind::Enrollment, &hex_id(40)).is_none());
}

#[tokio::test]
async fn delete_of_unknown_record_is_not_found() {
    let (app, _store) = test_app().await;
    let uri = format!("/rooms/{}?confirm=true", hex_id(55));
    let response = app
        .oneshot(empty_request("DELETE", &uri))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summary_reports_counters() {
    let (app, _store) = test_app().await;
    let response = app
        .oneshot(empty_request("GET", "/summary"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let summary = read_json(response).await;
    assert_eq!(summary["total_courses"], 2);
    assert_eq!(summary["enrollments"], 2);
    assert_eq!(summary["revenue"], 100.0);
}

#[tokio::test]
async fn reload_picks_up_records_added_behind_the_console() {
    let (app, store) = test_app().await;
    store.insert(
        EntityKind::Room,
        hex_id(11),
        json!({ "raumname": "Annex", "gebaeude": "East", "kapazitaet": 8 }),
    );

    let response = app
        .clone()
        .oneshot(empty_request("POST", "/reload"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "notification": null }));

    let listed = app
        .oneshot(empty_request("GET", "/rooms"))
        .await
        .expect("response");
    let rooms = read_json(listed).await;
    assert_eq!(rooms.as_array().map(Vec::len), Some(2));
}
