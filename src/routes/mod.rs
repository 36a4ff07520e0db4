//! API Routes
//!
//! - `POST /OcrChat/Submit` - queue an image for processing, returns a request id
//! - `GET /OcrChat/Result/{request_id}` - poll for the processed result
//! - `GET /api/health` - liveness plus queue depth

pub mod health;
pub mod ocr_chat;

use axum::Router;
use tracing::info;

use crate::middleware::apply_layers;
use crate::models::AppState;

/// Create the main application router with all HTTP layers applied
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let max_body_bytes = state.config.upload.max_bytes;
    let router = Router::new()
        .merge(ocr_chat::router(state.clone()))
        .merge(health::router(state));

    apply_layers(router, max_body_bytes)
}
