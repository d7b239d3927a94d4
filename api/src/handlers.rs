use crate::error::ApiError;
use crate::parse_request::ParseRequest;
use crate::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use syllabus_parser::ServiceError;
use uuid::Uuid;

pub async fn health() -> &'static str {
    "Syllabus parser is running"
}

pub async fn parse_syllabus(
    State(state): State<AppState>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request_id = Uuid::new_v4().simple().to_string()[..8].to_string();

    let Json(payload) = payload.map_err(|rejection| {
        log::warn!("[{}] Rejected request body: {}", request_id, rejection.body_text());
        rejection
    })?;

    let file = match payload.file {
        Some(file) if !file.trim().is_empty() => file,
        _ => {
            log::warn!("[{}] Request without file", request_id);
            return Err(ServiceError::Input("Missing Base64 file".to_string()).into());
        }
    };

    log::info!("[{}] Parsing syllabus ({} base64 chars)", request_id, file.len());

    match state.syllabus_service.parse_base64(&file).await {
        Ok(parsed) => {
            log::info!("[{}] Syllabus parsed", request_id);
            Ok(Json(parsed))
        }
        Err(err) => {
            log::error!("[{}] {}", request_id, err);
            Err(err.into())
        }
    }
}
