use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use toprank_core::ScoringConfig;
use tower::ServiceExt;

fn build_tiny_corpus(dir: &std::path::Path) {
    fs::write(dir.join("doc1"), "Space is cool and vast.").unwrap();
    fs::write(dir.join("doc2"), "American history is long.").unwrap();
}

fn app() -> Router {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    // corpus is read fully at startup, the directory may go away afterwards
    server::build_app(&dir.path().to_string_lossy(), ScoringConfig::default()).unwrap()
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn search_returns_top_document() {
    let (status, json) = call(app(), "/search?q=cool%20facts%20about%20space").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["document"], "doc1");
    let score = json["score"].as_f64().unwrap();
    assert!((score - 2.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn stopword_query_is_bad_request() {
    let (status, json) = call(app(), "/search?q=the%20and%20of").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("no terms"));
}

#[tokio::test]
async fn empty_corpus_returns_null_match() {
    let dir = tempdir().unwrap();
    let app = server::build_app(&dir.path().to_string_lossy(), ScoringConfig::default()).unwrap();
    let (status, json) = call(app, "/search?q=space").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["document"].is_null());
    assert!(json["score"].is_null());
}

#[tokio::test]
async fn doc_endpoint_lists_terms() {
    let (status, json) = call(app(), "/doc/doc2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tokens"], 3);
    assert_eq!(json["top_terms"].as_array().unwrap().len(), 3);

    let (status, _) = call(app(), "/doc/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_reports_corpus_size() {
    let (status, json) = call(app(), "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["documents"], 2);
    assert_eq!(json["vocabulary"], 6);
    assert_eq!(json["idf_formula"], "standard");
}
