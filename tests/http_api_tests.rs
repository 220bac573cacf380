// Router-level tests for the HTTP contract: status codes, body shapes and
// the multipart audio upload.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{test_state, valid_artifact_text};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_req(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn multipart_upload(uri: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let boundary = "test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_reports_status_and_backend_reachability() {
    let (_tmp, state, _provider) = test_state(&[]);
    let app = caseflow::create_router(state);

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["provider"], "ollama");
    assert!(body["ollama_available"].is_boolean());
}

#[tokio::test]
async fn unknown_session_routes_return_404() {
    let (_tmp, state, _provider) = test_state(&[]);
    let app = caseflow::create_router(state);

    let (status, _) = send(&app, get("/api/sessions/SESSION-missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty_post("/api/sessions/SESSION-missing/unlink")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty_post("/api/sessions/SESSION-missing/summarize")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/api/cases/CASE-2026-9999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_create_upload_transcript_summarize_flow() {
    let artifact = valid_artifact_text();
    let (_tmp, state, _provider) = test_state(&[artifact.as_str()]);
    let app = caseflow::create_router(state);

    // Create without a body
    let (status, session) = send(&app, empty_post("/api/sessions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["status"], "draft");
    let sid = session["session_id"].as_str().unwrap().to_string();
    assert!(sid.starts_with("SESSION-"));

    // Multipart audio upload
    let (status, view) = send(
        &app,
        multipart_upload(&format!("/api/sessions/{sid}/audio"), "clip.wav", b"abcd"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["status"], "uploaded");
    assert_eq!(view["file_size"], 4);

    // Transcript
    let (status, view) = send(
        &app,
        json_req(
            "PUT",
            &format!("/api/sessions/{sid}/transcript"),
            json!({"transcript": "Hello world"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["status"], "uploaded");
    assert_eq!(view["transcript"], "Hello world");

    // Summarize
    let (status, view) = send(&app, empty_post(&format!("/api/sessions/{sid}/summarize"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["status"], "summarized");
    assert_eq!(view["summary"]["title"], "T");

    // Listed
    let (status, list) = send(&app, get("/api/sessions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn upload_without_file_field_is_400() {
    let (_tmp, state, _provider) = test_state(&[]);
    let app = caseflow::create_router(state);

    let (_, session) = send(&app, empty_post("/api/sessions")).await;
    let sid = session["session_id"].as_str().unwrap();

    // Multipart body with a plain field, no filename
    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{boundary}--\r\n"
    );
    let req = Request::builder()
        .method("POST")
        .uri(format!("/api/sessions/{sid}/audio"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file");
}

#[tokio::test]
async fn summarize_without_transcript_is_400() {
    let (_tmp, state, _provider) = test_state(&[]);
    let app = caseflow::create_router(state);

    let (_, session) = send(&app, empty_post("/api/sessions")).await;
    let sid = session["session_id"].as_str().unwrap();

    let (status, body) = send(&app, empty_post(&format!("/api/sessions/{sid}/summarize"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No transcript to summarize");
}

#[tokio::test]
async fn case_create_link_and_fetch() {
    let (_tmp, state, _provider) = test_state(&[]);
    let app = caseflow::create_router(state);

    let (status, case) = send(&app, json_req("POST", "/api/cases", json!({"alias": "client a"}))).await;
    assert_eq!(status, StatusCode::OK);
    let case_id = case["case_id"].as_str().unwrap().to_string();
    assert!(case_id.starts_with("CASE-"));
    assert_eq!(case["sessions"], json!([]));

    let (_, session) = send(&app, empty_post("/api/sessions")).await;
    let sid = session["session_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        empty_post(&format!("/api/cases/{case_id}/sessions/{sid}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, case) = send(&app, get(&format!("/api/cases/{case_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(case["sessions"].as_array().unwrap().len(), 1);
    assert_eq!(case["sessions"][0]["session_id"], sid.as_str());

    let (status, cases) = send(&app, get("/api/cases")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cases[0]["session_count"], 1);

    // Linking to an unknown case is 404
    let (status, _) = send(
        &app,
        empty_post(&format!("/api/cases/CASE-2026-9999/sessions/{sid}")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn system_config_round_trip() {
    let (_tmp, state, _provider) = test_state(&[]);
    let app = caseflow::create_router(state);

    let (status, cfg) = send(&app, get("/api/system/config")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cfg["provider"], "ollama");
    assert_eq!(cfg["debug"], false);
    assert_eq!(cfg["whisper_model"], "base");

    let (status, cfg) = send(
        &app,
        json_req("PATCH", "/api/system/config", json!({"debug": true, "model": "mistral"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cfg["debug"], true);
    assert_eq!(cfg["model"], "mistral");

    let (_, cfg) = send(&app, get("/api/system/config")).await;
    assert_eq!(cfg["model"], "mistral");
}

#[tokio::test]
async fn system_catalogs_are_served() {
    let (_tmp, state, _provider) = test_state(&[]);
    let app = caseflow::create_router(state);

    let (status, providers) = send(&app, get("/api/system/providers")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(providers.as_array().unwrap().iter().any(|p| p["id"] == "ollama"));

    let (status, models) = send(&app, get("/api/system/whisper-models")).await;
    assert_eq!(status, StatusCode::OK);
    let models = models["models"].as_array().unwrap();
    assert!(models.contains(&json!("base")));
    assert!(models.contains(&json!("small")));
}
