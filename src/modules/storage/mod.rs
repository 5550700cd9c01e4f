//! Object storage for report media
//!
//! S3-compatible bucket (MinIO in development) behind the `ObjectStorage` trait.

mod minio_client;
mod object_storage;
mod sigv4;

pub use minio_client::MinIOClient;
pub use object_storage::ObjectStorage;
