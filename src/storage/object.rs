use crate::error::AppError;

/// Key and byte size of one stored object, as reported by a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: i64,
}

#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Request bucket creation. Errors if the bucket already exists.
    async fn create_bucket(&self, bucket: &str) -> Result<(), AppError>;
    /// Create or fully replace one object.
    async fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), AppError>;
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), AppError>;
    /// List every object in the bucket, following continuation pages.
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectSummary>, AppError>;
}
