use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::errors::StoreResult;
use crate::store::{BlobStore, ObjectHandle, WriteOptions};

/// An object held by [`MemoryBlobStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub options: WriteOptions,
}

/// Keeps objects in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    bucket: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryBlobStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn bucket_name(&self) -> &str {
        &self.bucket
    }

    async fn write(&self, key: &str, data: &[u8], options: WriteOptions) -> StoreResult<ObjectHandle> {
        let object = StoredObject { data: data.to_vec(), options };
        self.objects.write().await.insert(key.to_string(), object);
        Ok(ObjectHandle {
            bucket_name: self.bucket.clone(),
            object_key: key.to_string(),
        })
    }
}
