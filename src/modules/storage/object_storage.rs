use async_trait::async_trait;

use crate::core::error::AppError;

/// Upload-by-key storage returning publicly resolvable URLs
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` under `key` and return its public URL
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str)
        -> Result<String, AppError>;

    async fn delete(&self, key: &str) -> Result<(), AppError>;

    /// URL an object stored under `key` is served from
    fn public_url(&self, key: &str) -> String;

    /// Prefix under which objects are publicly readable
    fn public_prefix(&self) -> &str;
}
