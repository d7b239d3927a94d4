use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use syllabus_parser::config::{ConversionConfig, GeminiConfig};
pub use syllabus_parser::test_util::one_page_pdf;
use syllabus_parser::{ConversionService, DocumentProcessor, GeminiService, SyllabusService, TextSource};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}", addr)
}

/// Fake generateContent endpoint answering every request with `status` and `body`.
pub async fn fake_gemini(status: StatusCode, body: Value) -> String {
    let app = Router::new().fallback(move || {
        let body = body.clone();
        async move { (status, Json(body)) }
    });
    format!("{}/v1beta", serve(app).await)
}

/// Base URL of a Gemini endpoint where nothing is listening.
pub async fn unreachable_gemini() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1beta", addr)
}

/// Fake generateContent endpoint whose single candidate says `text`.
pub async fn gemini_replying(text: &str) -> String {
    fake_gemini(
        StatusCode::OK,
        json!({ "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }] }),
    )
    .await
}

/// Fake conversion API whose jobs never leave "processing".
pub async fn stuck_conversion_api() -> String {
    let app = Router::new()
        .route(
            "/v1/jobs",
            axum::routing::post(|| async { Json(json!({ "id": 9, "status": "initialising" })) }),
        )
        .route(
            "/v1/jobs/:id",
            get(|| async { Json(json!({ "id": 9, "status": "processing", "target_files": [] })) }),
        );
    format!("{}/v1", serve(app).await)
}

fn gemini(base_url: String) -> GeminiService {
    GeminiService::new(&GeminiConfig {
        api_key: "test-key".to_string(),
        model: "gemini-2.0-flash".to_string(),
        base_url,
    })
}

pub fn local_app(gemini_base: String) -> Router {
    local_app_with_limit(gemini_base, 50 * 1024 * 1024)
}

pub fn local_app_with_limit(gemini_base: String, max_body_bytes: usize) -> Router {
    let service = SyllabusService::new(TextSource::Local(DocumentProcessor::new()), gemini(gemini_base));
    syllabus_api::app(Arc::new(service), max_body_bytes)
}

pub fn conversion_app(conversion_base: String, gemini_base: String) -> Router {
    let conversion = ConversionService::new(&ConversionConfig {
        api_key: "z".to_string(),
        base_url: conversion_base,
        poll_interval: Duration::from_millis(5),
        max_attempts: 3,
    });
    let service = SyllabusService::new(TextSource::Conversion(conversion), gemini(gemini_base));
    syllabus_api::app(Arc::new(service), 50 * 1024 * 1024)
}

pub fn json_post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/parse-syllabus")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
