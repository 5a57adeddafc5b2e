pub mod errors;
pub mod local_store;
pub mod memory_store;
pub mod s3_store;
pub mod store;

pub use errors::{StoreError, StoreResult};
pub use local_store::LocalFileBlobStore;
pub use memory_store::{MemoryBlobStore, StoredObject};
pub use s3_store::{create_s3_client, S3BlobStore};
pub use store::{BlobStore, ObjectHandle, WriteOptions};
