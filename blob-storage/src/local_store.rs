use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;
use crate::errors::{StoreError, StoreResult};
use crate::store::{BlobStore, ObjectHandle, WriteOptions};

const METADATA_SUFFIX: &str = ".metadata.json";

/// What gets written next to every object so the serving side can recover it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidecarMetadata {
    pub content_type: String,
    pub metadata: HashMap<String, String>,
}

/// A `BlobStore` that lays objects out as files under `<base_path>/<bucket>/<key>`.
///
/// Object and sidecar are staged under temporary names and renamed into place,
/// sidecar first, so a failed write never publishes new bytes.
#[derive(Clone, Debug)]
pub struct LocalFileBlobStore {
    base_path: PathBuf,
    bucket: String,
    /// Held across the two renames so concurrent writers to one key cannot
    /// pair one writer's bytes with another's metadata.
    commit_lock: Arc<Mutex<()>>,
}

impl LocalFileBlobStore {
    pub fn new(base_path: impl Into<PathBuf>, bucket: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            bucket: bucket.into(),
            commit_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Resolves `key` to a file path inside the bucket directory.
    pub fn object_path(&self, key: &str) -> StoreResult<PathBuf> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if key.is_empty() || escapes {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(&self.bucket).join(relative))
    }

    fn sidecar_path(object_path: &Path) -> PathBuf {
        let mut name = object_path.as_os_str().to_owned();
        name.push(METADATA_SUFFIX);
        PathBuf::from(name)
    }

    fn staging_path(target: &Path) -> PathBuf {
        let mut name = target.as_os_str().to_owned();
        name.push(format!(".{}.tmp", Uuid::new_v4()));
        PathBuf::from(name)
    }

    async fn stage_and_commit(
        &self,
        file_path: &Path,
        data: &[u8],
        sidecar_bytes: &[u8],
        staged_object: &Path,
        staged_sidecar: &Path,
    ) -> StoreResult<()> {
        fs::write(staged_object, data).await.map_err(io_err)?;
        fs::write(staged_sidecar, sidecar_bytes).await.map_err(io_err)?;

        let _guard = self.commit_lock.lock().await;
        fs::rename(staged_sidecar, Self::sidecar_path(file_path)).await.map_err(io_err)?;
        // rename replaces, so a second write to the same key replaces the object.
        fs::rename(staged_object, file_path).await.map_err(io_err)?;
        Ok(())
    }
}

fn io_err(e: std::io::Error) -> StoreError {
    match e.kind() {
        ErrorKind::PermissionDenied => StoreError::PermissionDenied(e.to_string()),
        _ => StoreError::Io(e),
    }
}

#[async_trait]
impl BlobStore for LocalFileBlobStore {
    fn bucket_name(&self) -> &str {
        &self.bucket
    }

    async fn write(&self, key: &str, data: &[u8], options: WriteOptions) -> StoreResult<ObjectHandle> {
        let file_path = self.object_path(key)?;
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let sidecar = SidecarMetadata {
            content_type: options.content_type,
            metadata: options.metadata,
        };
        let sidecar_bytes = serde_json::to_vec_pretty(&sidecar)?;

        let staged_object = Self::staging_path(&file_path);
        let staged_sidecar = Self::staging_path(&Self::sidecar_path(&file_path));
        let committed = self
            .stage_and_commit(&file_path, data, &sidecar_bytes, &staged_object, &staged_sidecar)
            .await;
        if let Err(e) = committed {
            let _ = fs::remove_file(&staged_object).await;
            let _ = fs::remove_file(&staged_sidecar).await;
            tracing::warn!(path = %file_path.display(), "object write failed: {}", e);
            return Err(e);
        }
        tracing::debug!(path = %file_path.display(), bytes = data.len(), "wrote object");

        Ok(ObjectHandle {
            bucket_name: self.bucket.clone(),
            object_key: key.to_string(),
        })
    }
}
