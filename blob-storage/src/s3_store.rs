use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use crate::errors::{StoreError, StoreResult};
use crate::store::{BlobStore, ObjectHandle, WriteOptions};

/// A `BlobStore` backed by any S3-compatible service (AWS, MinIO, GCS interop).
#[derive(Clone, Debug)]
pub struct S3BlobStore {
    s3_client: S3Client,
    bucket: String,
}

/// Creates an S3 client from the ambient AWS configuration.
///
/// When `endpoint` is set the client talks to it with path-style addressing,
/// which MinIO and most emulators require.
pub async fn create_s3_client(endpoint: Option<&str>) -> S3Client {
    // Region is mandatory for the SDK even when the endpoint ignores it.
    let region_provider = RegionProviderChain::default_provider().or_else("us-east-1");
    let base_config = aws_config::defaults(BehaviorVersion::latest()).region(region_provider).load().await;

    let mut builder = Builder::from(&base_config);
    if let Some(endpoint) = endpoint {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }
    S3Client::from_conf(builder.build())
}

impl S3BlobStore {
    pub fn new(s3_client: S3Client, bucket: impl Into<String>) -> Self {
        Self { s3_client, bucket: bucket.into() }
    }
}

fn sdk_err<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let code = err.as_service_error().and_then(|e| e.code()).map(str::to_owned);
    let message = DisplayErrorContext(&err).to_string();
    match code.as_deref() {
        Some("AccessDenied") | Some("Forbidden") | Some("InvalidAccessKeyId") => StoreError::PermissionDenied(message),
        _ => StoreError::Backend(message),
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    fn bucket_name(&self) -> &str {
        &self.bucket
    }

    async fn write(&self, key: &str, data: &[u8], options: WriteOptions) -> StoreResult<ObjectHandle> {
        tracing::debug!(bucket = %self.bucket, key, "putting object");
        self.s3_client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(options.content_type)
            .set_metadata(Some(options.metadata))
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(sdk_err)?;

        Ok(ObjectHandle {
            bucket_name: self.bucket.clone(),
            object_key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::put_object::PutObjectError;

    fn service_error(code: &str) -> SdkError<PutObjectError, ()> {
        let meta = ErrorMetadata::builder().code(code).message("rejected by bucket policy").build();
        SdkError::service_error(PutObjectError::generic(meta), ())
    }

    #[test]
    fn access_errors_map_to_permission_denied() {
        for code in ["AccessDenied", "Forbidden", "InvalidAccessKeyId"] {
            let err = sdk_err(service_error(code));
            assert!(matches!(err, StoreError::PermissionDenied(_)), "code {code} gave {err:?}");
        }
    }

    #[test]
    fn other_service_errors_map_to_backend() {
        let err = sdk_err(service_error("SlowDown"));
        match err {
            StoreError::Backend(message) => assert!(message.contains("SlowDown"), "{message}"),
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[test]
    fn transport_errors_map_to_backend() {
        let err = sdk_err(SdkError::<PutObjectError, ()>::timeout_error("request timed out"));
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
