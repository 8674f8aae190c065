use crate::common::error::{
    CreateDirectory, DownloadObject, ListObjects, ReadingFile, Result, StorageBuild,
    UnsupportedStorage, UploadObject, WritingFile,
};
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{path::Path as ObjectPath, ObjectStore};
use snafu::ResultExt;
use std::{path::Path, sync::Arc};
use tracing::{debug, info};

/// A storage bucket which holds published chart archives.
#[async_trait]
pub trait ChartBucket: Send + Sync {
    /// Uploads the local file at `filepath` to `key`.
    async fn upload(&self, filepath: &Path, key: &str) -> Result<()>;

    /// Downloads the object at `key` to the local file `filepath`.
    async fn download(&self, key: &str, filepath: &Path) -> Result<()>;

    /// Lists the keys of every object under `prefix`.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Access to the bucket charts are published to. The bucket is owned by the caller, and is
/// only borrowed for the duration of a publish or pull.
#[derive(Clone)]
pub struct PublishRules {
    bucket: Arc<dyn ChartBucket>,
}

impl PublishRules {
    pub fn new(bucket: Arc<dyn ChartBucket>) -> Self {
        Self { bucket }
    }

    /// This is a getter for the bucket.
    pub fn bucket(&self) -> &dyn ChartBucket {
        self.bucket.as_ref()
    }
}

/// Configuration for the chart bucket.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage type: "s3", "local" or "memory".
    pub storage_type: String,
    /// Bucket name for s3, directory for local.
    pub bucket: String,
    /// S3 region.
    pub region: Option<String>,
    /// S3 endpoint, for S3-compatible stores.
    pub endpoint: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: "s3".to_owned(),
            bucket: String::new(),
            region: None,
            endpoint: None,
        }
    }
}

/// A ChartBucket on top of any object_store backend.
pub struct ObjectStoreBucket {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreBucket {
    /// Create a bucket from configuration.
    pub fn new(config: &StorageConfig) -> Result<Self> {
        Ok(Self {
            store: create_object_store(config)?,
        })
    }

    /// Create a bucket with a pre-configured object store.
    #[must_use]
    pub fn with_store(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ChartBucket for ObjectStoreBucket {
    async fn upload(&self, filepath: &Path, key: &str) -> Result<()> {
        let data = tokio::fs::read(filepath).await.context(ReadingFile {
            filepath: filepath.to_path_buf(),
        })?;
        let size = data.len();

        self.store
            .put(&ObjectPath::from(key), Bytes::from(data).into())
            .await
            .context(UploadObject {
                filepath: filepath.to_path_buf(),
                key,
            })?;

        debug!(%key, size, "Uploaded object");
        Ok(())
    }

    async fn download(&self, key: &str, filepath: &Path) -> Result<()> {
        let data = self
            .store
            .get(&ObjectPath::from(key))
            .await
            .context(DownloadObject { key })?
            .bytes()
            .await
            .context(DownloadObject { key })?;

        if let Some(parent) = filepath.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context(CreateDirectory { path: parent })?;
        }
        tokio::fs::write(filepath, &data)
            .await
            .context(WritingFile {
                filepath: filepath.to_path_buf(),
            })?;

        debug!(%key, path = %filepath.display(), size = data.len(), "Downloaded object");
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix_path = ObjectPath::from(prefix);
        let objects: Vec<_> = self
            .store
            .list(Some(&prefix_path))
            .try_collect()
            .await
            .context(ListObjects { prefix })?;

        Ok(objects
            .into_iter()
            .map(|meta| meta.location.to_string())
            .collect())
    }
}

/// Create an object store from configuration.
fn create_object_store(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>> {
    info!(storage_type = %config.storage_type, bucket = %config.bucket, "Creating chart bucket");
    match config.storage_type.as_str() {
        "local" => {
            let store = object_store::local::LocalFileSystem::new_with_prefix(&config.bucket)
                .context(StorageBuild {
                    storage_type: "local",
                    bucket: config.bucket.as_str(),
                })?;
            Ok(Arc::new(store))
        }
        "memory" => Ok(Arc::new(object_store::memory::InMemory::new())),
        #[cfg(feature = "aws")]
        "s3" => {
            use object_store::aws::AmazonS3Builder;
            let mut builder = AmazonS3Builder::from_env().with_bucket_name(&config.bucket);

            if let Some(region) = &config.region {
                builder = builder.with_region(region);
            }
            if let Some(endpoint) = &config.endpoint {
                builder = builder.with_endpoint(endpoint);
            }

            let store = builder.build().context(StorageBuild {
                storage_type: "s3",
                bucket: config.bucket.as_str(),
            })?;
            Ok(Arc::new(store))
        }
        _ => UnsupportedStorage {
            storage_type: config.storage_type.as_str(),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartBucket, ObjectStoreBucket, StorageConfig};
    use crate::common::error::Error;
    use std::fs;

    fn memory_bucket() -> ObjectStoreBucket {
        ObjectStoreBucket::new(&StorageConfig {
            storage_type: "memory".to_owned(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn upload_list_download() {
        let bucket = memory_bucket();
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("api-0.0.0.tgz");
        fs::write(&local, b"chart bytes").unwrap();

        bucket
            .upload(&local, "helm_charts/0.0.0/demo/abc123/api.abc123.tgz")
            .await
            .unwrap();

        let keys = bucket.list("helm_charts/0.0.0/demo/abc123/").await.unwrap();
        assert_eq!(keys, vec!["helm_charts/0.0.0/demo/abc123/api.abc123.tgz"]);
        assert!(bucket
            .list("helm_charts/0.0.0/demo/other/")
            .await
            .unwrap()
            .is_empty());

        let fetched = dir.path().join("fetched/api.abc123.tgz");
        bucket
            .download("helm_charts/0.0.0/demo/abc123/api.abc123.tgz", &fetched)
            .await
            .unwrap();
        assert_eq!(fs::read(&fetched).unwrap(), b"chart bytes");
    }

    #[tokio::test]
    async fn download_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let result = memory_bucket()
            .download("helm_charts/0.0.0/demo/abc123/nope.abc123.tgz", &dir.path().join("x"))
            .await;
        assert!(matches!(result, Err(Error::DownloadObject { .. })));
        assert!(!dir.path().join("x").exists());
    }

    #[tokio::test]
    async fn local_directory_bucket() {
        let root = tempfile::tempdir().unwrap();
        let bucket = ObjectStoreBucket::new(&StorageConfig {
            storage_type: "local".to_owned(),
            bucket: root.path().to_string_lossy().to_string(),
            ..Default::default()
        })
        .unwrap();

        let archive = root.path().join("upload.tgz");
        fs::write(&archive, b"tgz").unwrap();
        bucket.upload(&archive, "helm_charts/0.0.0/p/r/c.r.tgz").await.unwrap();

        assert!(root.path().join("helm_charts/0.0.0/p/r/c.r.tgz").is_file());
    }

    #[test]
    fn unsupported_storage_type() {
        let result = ObjectStoreBucket::new(&StorageConfig {
            storage_type: "ftp".to_owned(),
            ..Default::default()
        });
        assert!(matches!(
            result,
            Err(Error::UnsupportedStorage { storage_type }) if storage_type == "ftp"
        ));
    }
}
