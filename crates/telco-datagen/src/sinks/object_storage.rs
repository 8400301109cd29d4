//! Object storage sink for call record exports
//!
//! Two backends share one code path once the bucket exists:
//!
//! - `local`: the bucket is a directory under `local_root`
//! - `gcs`: Google Cloud Storage; the bucket is looked up and created
//!   through the JSON API, objects are written through `object_store`

use super::ObjectSink;
use crate::error::{GenError, GenResult};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use telco_core::config::{StorageBackend, StorageConfig};
use tracing::{debug, info, instrument};

/// Writes CSV payloads into the configured bucket
pub struct ObjectStorageSink {
    config: StorageConfig,
    http_client: Client,
}

impl ObjectStorageSink {
    pub fn new(config: StorageConfig) -> GenResult<Self> {
        let http_client = Client::builder().build()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Directory standing in for the bucket on the local backend
    pub fn local_bucket_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.local_root).join(&self.config.bucket)
    }

    /// Create the bucket if absent; safe to repeat
    #[instrument(skip(self), fields(bucket = %self.config.bucket))]
    pub async fn ensure_bucket(&self) -> GenResult<()> {
        match self.config.backend {
            StorageBackend::Local => self.ensure_local_bucket().await,
            StorageBackend::Gcs => self.ensure_gcs_bucket().await,
        }
    }

    async fn ensure_local_bucket(&self) -> GenResult<()> {
        let dir = self.local_bucket_dir();
        if tokio::fs::try_exists(&dir).await? {
            info!("Bucket {} already exists", self.config.bucket);
            return Ok(());
        }

        tokio::fs::create_dir_all(&dir).await?;
        info!("Bucket {} created at {}", self.config.bucket, dir.display());
        Ok(())
    }

    async fn ensure_gcs_bucket(&self) -> GenResult<()> {
        let url = format!("{}/storage/v1/b/{}", self.gcs_endpoint(), self.config.bucket);
        let response = self.authorized(self.http_client.get(&url)).send().await?;

        match response.status() {
            status if status.is_success() => {
                info!("Bucket {} already exists", self.config.bucket);
                Ok(())
            }
            StatusCode::NOT_FOUND => self.create_gcs_bucket().await,
            status => Err(GenError::Bucket(format!(
                "lookup of {} returned {}",
                self.config.bucket, status
            ))),
        }
    }

    async fn create_gcs_bucket(&self) -> GenResult<()> {
        let project = self.config.project_id.as_deref().ok_or_else(|| {
            GenError::Config("storage.project_id is required to create a bucket".to_string())
        })?;

        let url = format!("{}/storage/v1/b", self.gcs_endpoint());
        let request = self
            .http_client
            .post(&url)
            .query(&[("project", project)])
            .json(&json!({
                "name": self.config.bucket,
                "location": self.config.location,
            }));
        let response = self.authorized(request).send().await?;

        match response.status() {
            status if status.is_success() => {
                info!(
                    "Bucket {} created in {}",
                    self.config.bucket, self.config.location
                );
                Ok(())
            }
            // Lost a race with another writer
            StatusCode::CONFLICT => {
                info!("Bucket {} already exists", self.config.bucket);
                Ok(())
            }
            status => Err(GenError::Bucket(format!(
                "creation of {} returned {}",
                self.config.bucket, status
            ))),
        }
    }

    fn gcs_endpoint(&self) -> &str {
        self.config.gcs_endpoint.trim_end_matches('/')
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn open_store(&self) -> GenResult<Arc<dyn ObjectStore>> {
        let store: Arc<dyn ObjectStore> = match self.config.backend {
            StorageBackend::Local => {
                Arc::new(LocalFileSystem::new_with_prefix(self.local_bucket_dir())?)
            }
            StorageBackend::Gcs => {
                let mut builder =
                    GoogleCloudStorageBuilder::from_env().with_bucket_name(&self.config.bucket);
                if let Some(path) = &self.config.service_account_path {
                    builder = builder.with_service_account_path(path);
                }
                Arc::new(builder.build()?)
            }
        };
        Ok(store)
    }
}

#[async_trait]
impl ObjectSink for ObjectStorageSink {
    #[instrument(skip(self, payload), fields(bucket = %self.config.bucket, bytes = payload.len()))]
    async fn write_object(&self, path: &str, payload: Bytes) -> GenResult<()> {
        self.ensure_bucket().await?;

        let location = ObjectPath::parse(path).map_err(object_store::Error::from)?;
        let size = payload.len();
        debug!("Uploading {} bytes to {}", size, location);

        self.open_store()?
            .put(&location, PutPayload::from(payload))
            .await?;

        info!("File {} uploaded to {}", path, self.config.bucket);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config(root: &std::path::Path) -> StorageConfig {
        StorageConfig {
            local_root: root.display().to_string(),
            ..StorageConfig::default()
        }
    }

    #[tokio::test]
    async fn test_local_bucket_is_created_once() {
        let root = tempfile::tempdir().unwrap();
        let sink = ObjectStorageSink::new(local_config(root.path())).unwrap();

        sink.ensure_bucket().await.unwrap();
        assert!(root.path().join("telecom_de").is_dir());

        // Second call finds the existing directory
        sink.ensure_bucket().await.unwrap();
    }

    #[tokio::test]
    async fn test_local_write_creates_nested_object() {
        let root = tempfile::tempdir().unwrap();
        let sink = ObjectStorageSink::new(local_config(root.path())).unwrap();

        sink.write_object("src_calls/data_1.csv", Bytes::from_static(b"id\n1\n"))
            .await
            .unwrap();

        let written =
            std::fs::read(root.path().join("telecom_de/src_calls/data_1.csv")).unwrap();
        assert_eq!(written, b"id\n1\n");
    }

    #[tokio::test]
    async fn test_gcs_creation_requires_project() {
        let sink = ObjectStorageSink::new(StorageConfig {
            backend: StorageBackend::Gcs,
            ..StorageConfig::default()
        })
        .unwrap();

        let result = sink.create_gcs_bucket().await;
        assert!(matches!(result, Err(GenError::Config(_))));
    }
}
