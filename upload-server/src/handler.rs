use std::sync::Arc;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use blob_store::{BlobStore, WriteOptions};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::download_url::DownloadUrlBuilder;
use crate::errors::{HandlerError, INVALID_BASE64_MESSAGE};
use crate::token::TokenSource;

pub const UPLOAD_PREFIX: &str = "uploads/";
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";
/// Metadata key the media endpoint checks for token-based public reads.
pub const DOWNLOAD_TOKEN_METADATA_KEY: &str = "firebaseStorageDownloadTokens";

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

/// Padding optional, trailing bits tolerated.
const IMAGE_BASE64: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const IMAGE_BASE64_URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    #[validate(required, length(min = 1))]
    pub base64: Option<String>,
    #[validate(required, length(min = 1))]
    pub file_name: Option<String>,
}

impl UploadRequest {
    pub fn new(base64: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self { base64: Some(base64.into()), file_name: Some(file_name.into()) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub download_url: String,
}

fn decode_either_alphabet(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    IMAGE_BASE64
        .decode(encoded)
        .or_else(|e| IMAGE_BASE64_URL_SAFE.decode(encoded).map_err(|_| e))
}

/// Decodes image data in the standard or URL-safe alphabet, ignoring any
/// whitespace the client wrapped it with.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    if encoded.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        decode_either_alphabet(&compact)
    } else {
        decode_either_alphabet(encoded)
    }
}

/// Stores uploaded images and hands back their public download URL.
///
/// Holds no per-request state, so one instance serves every worker.
pub struct UploadHandler {
    store: Arc<dyn BlobStore>,
    tokens: Arc<dyn TokenSource>,
    urls: DownloadUrlBuilder,
}

impl UploadHandler {
    pub fn new(store: Arc<dyn BlobStore>, tokens: Arc<dyn TokenSource>, urls: DownloadUrlBuilder) -> Self {
        Self { store, tokens, urls }
    }

    pub async fn invoke(&self, request: UploadRequest) -> Result<UploadResponse, HandlerError> {
        if request.validate().is_err() {
            tracing::debug!("rejecting upload with missing fields");
            return Err(HandlerError::missing_fields());
        }
        let encoded = request.base64.unwrap_or_default();
        let file_name = request.file_name.unwrap_or_default();

        let data = decode_image(&encoded).map_err(|e| {
            tracing::debug!(file_name = %file_name, "rejecting upload: {}", e);
            HandlerError::InvalidArgument(INVALID_BASE64_MESSAGE.to_string())
        })?;

        let token = self.tokens.generate_token();
        // No escaping: the file name is taken as-is and overwrites whatever sits at the key.
        let key = format!("{}{}", UPLOAD_PREFIX, file_name);
        let options = WriteOptions::new(IMAGE_CONTENT_TYPE).with_metadata(DOWNLOAD_TOKEN_METADATA_KEY, token);

        let handle = match self.store.write(&key, &data, options).await {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(key = %key, "failed to store upload: {}", e);
                return Err(HandlerError::Internal(e));
            }
        };
        tracing::info!(key = %handle.object_key, bucket = %handle.bucket_name, bytes = data.len(), "stored upload");

        Ok(UploadResponse { download_url: self.urls.build(&handle) })
    }
}
