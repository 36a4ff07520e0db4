// OCR Chat Server - asynchronous image question answering behind a polled job queue

pub mod config;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod queue;
pub mod routes;
pub mod storage;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use pipeline::Pipeline;
pub use queue::{JobStore, Worker};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
