// Image storage
//
// `local` keeps submitted images on disk until the worker picks them up;
// the pipeline only sees the `ImageHost` trait, implemented by `imgur`.

use std::path::Path;

use async_trait::async_trait;

use crate::types::AppResult;

pub mod imgur;
pub mod local;

pub use imgur::ImgurClient;
pub use local::{persist_upload, remove_upload};

#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload a local image and return a publicly reachable URL for it.
    async fn upload(&self, local_path: &Path) -> AppResult<String>;
}
