//! Local directory object backend, the test/dev stand-in for S3. One
//! directory per bucket, one file per object.

use crate::error::AppError;
use crate::storage::object::{ObjectStore, ObjectSummary};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};

pub struct LocalFsObjectStore {
    root: PathBuf,
}

impl LocalFsObjectStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn bucket_dir(&self, bucket: &str) -> PathBuf {
        self.root.join(bucket)
    }
}

#[async_trait]
impl ObjectStore for LocalFsObjectStore {
    async fn create_bucket(&self, bucket: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.root).await?;
        // create_dir (not create_dir_all) so an existing bucket errors
        fs::create_dir(self.bucket_dir(bucket)).await?;
        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), AppError> {
        let path = self.bucket_dir(bucket).join(key);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await?;
        }
        let mut f = fs::File::create(path).await?;
        f.write_all(body).await?;
        f.flush().await?;
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), AppError> {
        fs::remove_file(self.bucket_dir(bucket).join(key)).await?;
        Ok(())
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectSummary>, AppError> {
        let mut entries = fs::read_dir(self.bucket_dir(bucket)).await?;
        let mut out = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            if meta.is_file() {
                out.push(ObjectSummary {
                    key: entry.file_name().to_string_lossy().into_owned(),
                    size: meta.len() as i64,
                });
            }
        }
        out.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_list_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFsObjectStore::new(dir.path());
        store.create_bucket("data").await.unwrap();
        assert!(store.list_objects("data").await.unwrap().is_empty());

        store.put_object("data", "a.txt", b"hello").await.unwrap();
        store.put_object("data", "b.txt", b"world!!").await.unwrap();
        let objects = store.list_objects("data").await.unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects.iter().map(|o| o.size).sum::<i64>(), 12);

        store.put_object("data", "a.txt", b"rewritten").await.unwrap();
        let objects = store.list_objects("data").await.unwrap();
        assert_eq!(objects.iter().find(|o| o.key == "a.txt").unwrap().size, 9);

        store.delete_object("data", "a.txt").await.unwrap();
        let objects = store.list_objects("data").await.unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].key, "b.txt");
    }

    #[tokio::test]
    async fn create_bucket_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFsObjectStore::new(dir.path());
        store.create_bucket("data").await.unwrap();
        assert!(store.create_bucket("data").await.is_err());
    }

    #[tokio::test]
    async fn listing_a_missing_bucket_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFsObjectStore::new(dir.path());
        assert!(store.list_objects("nope").await.is_err());
    }
}
