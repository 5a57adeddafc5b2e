use std::collections::HashMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::errors::StoreResult;

/// Options attached to a single object write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    pub content_type: String,
    /// Custom metadata stored alongside the object.
    pub metadata: HashMap<String, String>,
}

impl WriteOptions {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Where a written object ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHandle {
    pub bucket_name: String,
    pub object_key: String,
}

/// A key-addressed object store. Writes to an existing key replace the object.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Name of the bucket every object of this store lands in.
    fn bucket_name(&self) -> &str;

    /// Stores `data` under `key`.
    async fn write(&self, key: &str, data: &[u8], options: WriteOptions) -> StoreResult<ObjectHandle>;
}
