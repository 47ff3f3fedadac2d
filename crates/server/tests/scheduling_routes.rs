use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::auth::ServerState;
use service::{Capability, CapabilitySet};

const SECRET: &str = "routes-test-secret";

fn app() -> (Router, ServerState) {
    let mut cfg = configs::AppConfig::default();
    cfg.auth.jwt_secret = SECRET.into();
    let state = server::build_state(&cfg).unwrap();
    (server::build_app(state.clone()), state)
}

fn token(state: &ServerState, caps: CapabilitySet) -> String {
    state.verifier.issue("ross", caps, chrono::Duration::minutes(10)).unwrap()
}

fn read() -> CapabilitySet {
    CapabilitySet::empty().with(Capability::Read)
}

fn write() -> CapabilitySet {
    CapabilitySet::empty().with(Capability::Write)
}

fn request(method: Method, uri: &str, bearer: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, body)
}

#[tokio::test]
async fn public_routes_need_no_token() {
    let (app, _) = app();
    let (status, body) = send(&app, request(Method::GET, "/", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let resp = app.clone().oneshot(request(Method::GET, "/metrics", None, None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, body) = send(&app, request(Method::GET, "/api-docs/openapi.json", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/appointments/{appointment_id}"].is_object());
}

#[tokio::test]
async fn missing_or_bad_token_is_401() {
    let (app, _) = app();
    let (status, body) = send(&app, request(Method::GET, "/persons", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(&app, request(Method::GET, "/persons", Some("garbage"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let other = service::auth::TokenVerifier::new("other-secret", Default::default())
        .issue("x", CapabilitySet::all(), chrono::Duration::minutes(5))
        .unwrap();
    let (status, _) = send(&app, request(Method::GET, "/appointments", Some(&other), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cookie_token_is_accepted() {
    let (app, state) = app();
    let req = Request::builder()
        .uri("/persons/1")
        .header(header::COOKIE, format!("auth_token={}", token(&state, read())))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "Ross");
}

#[tokio::test]
async fn reads_return_seed_in_order() {
    let (app, state) = app();
    let t = token(&state, read());

    let (status, body) = send(&app, request(Method::GET, "/persons", Some(&t), None)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body.as_array().unwrap().iter().map(|p| p["personId"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(body[3]["email"], "chandler@friends.com");

    let (_, body) = send(&app, request(Method::GET, "/availability/1", Some(&t), None)).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["durationMinutes"], 60);

    let (status, body) = send(&app, request(Method::GET, "/availability/99", Some(&t), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, request(Method::GET, "/appointments/1", Some(&t), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["personId"], 1);
}

#[tokio::test]
async fn unknown_ids_are_404() {
    let (app, state) = app();
    let t = token(&state, read());
    let (status, body) = send(&app, request(Method::GET, "/persons/42", Some(&t), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    let (status, _) = send(&app, request(Method::GET, "/appointments/42", Some(&t), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_integer_id_rejected_before_core() {
    let (app, state) = app();
    let t = token(&state, read());
    let (status, _) = send(&app, request(Method::GET, "/persons/abc", Some(&t), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn write_only_token_cannot_read() {
    let (app, state) = app();
    let t = token(&state, write());
    let (status, body) = send(&app, request(Method::GET, "/persons", Some(&t), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");
}

#[tokio::test]
async fn read_only_token_cannot_write_and_store_is_unchanged() {
    let (app, state) = app();
    let r = token(&state, read());
    let appt = json!({"appointmentId": 2, "start": "2026-10-21T15:00:00Z", "durationMinutes": 30, "personId": 2});

    let (status, _) = send(&app, request(Method::POST, "/appointments", Some(&r), Some(appt.clone()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, request(Method::PUT, "/appointments/1", Some(&r), Some(appt))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = send(&app, request(Method::GET, "/appointments", Some(&r), None)).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_appends_even_duplicate_ids() {
    let (app, state) = app();
    let w = token(&state, write());
    let r = token(&state, read());
    // legacy field names are accepted on input
    let dup = json!({"appointmentId": 1, "dateTime": "2026-10-22T11:00:00Z", "duration": 15, "personId": 4});

    let (status, body) = send(&app, request(Method::POST, "/appointments", Some(&w), Some(dup))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, Value::Null);

    let (_, body) = send(&app, request(Method::GET, "/appointments", Some(&r), None)).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1]["personId"], 4);
    assert_eq!(list[1]["durationMinutes"], 15);
    assert_eq!(list[1]["start"], "2026-10-22T11:00:00Z");
}

#[tokio::test]
async fn update_replaces_then_appends() {
    let (app, state) = app();
    let both = token(&state, CapabilitySet::all());

    let new_1 = json!({"appointmentId": 1, "start": "2026-10-22T10:00:00Z", "durationMinutes": 30, "personId": 1});
    let (status, _) = send(&app, request(Method::PUT, "/appointments/1", Some(&both), Some(new_1.clone()))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, request(Method::GET, "/appointments", Some(&both), None)).await;
    assert_eq!(body, json!([new_1]));

    // no match behaves like create
    let extra = json!({"appointmentId": 9, "start": "2026-10-23T10:00:00Z", "durationMinutes": 45, "personId": 5});
    let (status, _) = send(&app, request(Method::PUT, "/appointments/77", Some(&both), Some(extra.clone()))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, request(Method::GET, "/appointments", Some(&both), None)).await;
    assert_eq!(body, json!([new_1, extra]));
}

#[tokio::test]
async fn update_keeps_body_id_even_when_it_differs() {
    let (app, state) = app();
    let both = token(&state, CapabilitySet::all());
    let drifted = json!({"appointmentId": 5, "start": "2026-10-22T10:00:00Z", "durationMinutes": 30, "personId": 1});
    send(&app, request(Method::PUT, "/appointments/1", Some(&both), Some(drifted))).await;

    let (status, _) = send(&app, request(Method::GET, "/appointments/1", Some(&both), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, request(Method::GET, "/appointments/5", Some(&both), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn legacy_singular_routes_match_plural() {
    let (app, state) = app();
    let t = token(&state, CapabilitySet::all());
    let (_, plural) = send(&app, request(Method::GET, "/persons", Some(&t), None)).await;
    let (_, singular) = send(&app, request(Method::GET, "/person", Some(&t), None)).await;
    assert_eq!(plural, singular);

    let (status, body) = send(&app, request(Method::GET, "/person/6", Some(&t), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lastName"], "Buffay");

    let appt = json!({"appointmentId": 3, "start": "2026-10-22T10:00:00Z", "durationMinutes": 30, "personId": 3});
    let (status, _) = send(&app, request(Method::POST, "/appointment", Some(&t), Some(appt))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, request(Method::GET, "/appointment/3", Some(&t), None)).await;
    assert_eq!(status, StatusCode::OK);
}
