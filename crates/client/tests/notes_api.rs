//! Integration tests for [`NotesApi`] against an in-process axum server.

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use waypoint_client::{NoteTransport, NotesApi, NotesApiError};
use waypoint_core::{HttpVerb, NoteFamily, NoteParent, NotePayload, NoteType};

type Received = Arc<Mutex<Vec<(String, Value)>>>;

// ---------------------------------------------------------------------------
// Test server
// ---------------------------------------------------------------------------

async fn create_city_note(
    State(received): State<Received>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    received.lock().unwrap().push(("POST /citynotes".into(), body.clone()));
    body["id"] = json!(42);
    (StatusCode::CREATED, Json(body))
}

async fn update_city_note(
    State(received): State<Received>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    received
        .lock()
        .unwrap()
        .push((format!("PATCH /citynotes/{id}"), body));
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Food not an allowed value for note_type."})),
    )
}

async fn list_city_notes() -> Json<Value> {
    Json(json!([
        {"id": 1, "note_body": "Learn a few phrases", "note_type": "Communication", "city_id": 4},
        {"id": 2, "note_body": "Avoid the night bus", "note_type": "Safety", "city_id": 4}
    ]))
}

async fn list_location_notes() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"error": "no notes exist"})))
}

async fn create_location_note() -> (StatusCode, &'static str) {
    (StatusCode::OK, "not json")
}

/// Bind an ephemeral port, serve the notes routes, and return the base URL.
async fn spawn_server() -> (String, Received) {
    let received: Received = Arc::default();
    let app = Router::new()
        .route("/citynotes", post(create_city_note).get(list_city_notes))
        .route("/citynotes/{id}", axum::routing::patch(update_city_note))
        .route(
            "/locationnotes",
            get(list_location_notes).post(create_location_note),
        )
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), received)
}

fn city_payload() -> NotePayload {
    NotePayload {
        body: "Great transit".to_string(),
        note_type: Some(NoteType::Transportation),
        parent: NoteParent::city(4),
        user_id: 7,
        author_email: "a@b.com".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_posts_payload_and_returns_persisted_record() {
    let (base, received) = spawn_server().await;
    let api = NotesApi::with_client(reqwest::Client::new(), base);

    let record = api
        .send(HttpVerb::Create, "citynotes", &city_payload())
        .await
        .expect("create should succeed");

    assert_eq!(record.id, Some(42));
    assert_eq!(record.body, "Great transit");
    assert_eq!(record.parent, NoteParent::city(4));
    assert_eq!(record.author_email.as_deref(), Some("a@b.com"));

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, "POST /citynotes");
    assert_eq!(
        received[0].1,
        json!({
            "note_body": "Great transit",
            "note_type": "Transportation",
            "city_id": 4,
            "user_id": 7,
            "val_user_email": "a@b.com"
        })
    );
}

#[tokio::test]
async fn update_uses_patch_and_surfaces_server_detail() {
    let (base, received) = spawn_server().await;
    let api = NotesApi::with_client(reqwest::Client::new(), base);

    let err = api
        .send(HttpVerb::Update, "citynotes/12", &city_payload())
        .await
        .expect_err("server rejects the update");

    assert_matches!(&err, NotesApiError::Api { status: 400, .. });
    assert_eq!(err.network_message(), "Request failed with status code 400");
    assert_eq!(err.server_detail(), Some("Food not an allowed value for note_type."));
    assert_eq!(received.lock().unwrap()[0].0, "PATCH /citynotes/12");
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_error() {
    let (base, _) = spawn_server().await;
    let api = NotesApi::with_client(reqwest::Client::new(), base);

    let payload = NotePayload {
        note_type: None,
        parent: NoteParent::location(3),
        ..city_payload()
    };
    let err = api
        .send(HttpVerb::Create, "locationnotes", &payload)
        .await
        .expect_err("body is not a record");

    assert_matches!(&err, NotesApiError::Decode(_));
}

#[tokio::test]
async fn list_returns_city_notes() {
    let (base, _) = spawn_server().await;
    let api = NotesApi::with_client(reqwest::Client::new(), base);

    let notes = api.list_notes(NoteFamily::City).await.expect("list should succeed");
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[1].note_type, Some(NoteType::Safety));
}

#[tokio::test]
async fn empty_collection_404_is_an_empty_list() {
    let (base, _) = spawn_server().await;
    let api = NotesApi::with_client(reqwest::Client::new(), base);

    let notes = api
        .list_notes(NoteFamily::Location)
        .await
        .expect("404 means no notes");
    assert!(notes.is_empty());
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    // Bind and immediately drop a listener so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = NotesApi::with_client(reqwest::Client::new(), format!("http://{addr}"));
    let err = api
        .send(HttpVerb::Create, "citynotes", &city_payload())
        .await
        .expect_err("nothing listens there");

    assert_matches!(&err, NotesApiError::Request(_));
    assert_eq!(err.network_message(), "Network Error");
}
