use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use tracing::{debug, info};

use crate::models::{AppState, Language, SizeMode, SubmitResponse};
use crate::queue::JobResult;
use crate::storage::persist_upload;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/OcrChat/Submit", post(submit))
        .route("/OcrChat/Result/{request_id}", get(get_result))
        .with_state(state)
}

#[derive(Default)]
struct SubmitForm {
    file: Option<(Option<String>, Bytes)>,
    language: Option<String>,
    size: Option<String>,
    text_only: Option<String>,
}

/// Read the multipart body. Field names match case-insensitively.
async fn read_form(mut multipart: Multipart) -> AppResult<SubmitForm> {
    let mut form = SubmitForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_ascii_lowercase();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidRequest(format!("Failed to read file: {}", e)))?;
                form.file = Some((file_name, data));
            }
            "language" | "size" | "textonly" | "text_only" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidRequest(format!("Failed to read {}: {}", name, e)))?;
                let value = Some(value.trim().to_string());
                match name.as_str() {
                    "language" => form.language = value,
                    "size" => form.size = value,
                    _ => form.text_only = value,
                }
            }
            _ => debug!(field = %name, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

fn parse_flag(value: &str) -> AppResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" => Ok(true),
        "false" | "0" | "off" | "" => Ok(false),
        other => Err(AppError::InvalidRequest(format!(
            "textOnly must be a boolean, got '{}'",
            other
        ))),
    }
}

async fn submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<SubmitResponse>> {
    let form = read_form(multipart).await?;

    let (file_name, data) = form
        .file
        .filter(|(_, data)| !data.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("No image file provided.".to_string()))?;

    let language: Language = form
        .language
        .ok_or_else(|| AppError::InvalidRequest("language is required".to_string()))?
        .parse()?;
    let size: SizeMode = form
        .size
        .ok_or_else(|| AppError::InvalidRequest("size is required".to_string()))?
        .parse()?;
    let text_only = match form.text_only.as_deref() {
        Some(value) => parse_flag(value)?,
        None => false,
    };

    let path = persist_upload(&state.config.upload.dir, file_name.as_deref(), &data).await?;
    let request_id = state.store.submit(language, size, path, text_only);

    info!(
        request_id = %request_id,
        language = %language,
        size = %size,
        text_only,
        bytes = data.len(),
        "Submission queued"
    );

    Ok(Json(SubmitResponse { request_id }))
}

async fn get_result(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> AppResult<Json<JobResult>> {
    state
        .store
        .get_result(&request_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Result not found or still processing.".to_string()))
}
