//! Upload URL issuance.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{PresignPut, S3Presigner, StorageConfig, StorageResult};

/// Bucket and object key an upload URL is requested for.
///
/// Both are passed through verbatim; only the ULID injection changes the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUrlRequest {
    pub bucket: String,
    pub key: String,
}

impl PresignedUrlRequest {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// A signed upload URL and the unique key it was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUrlResponse {
    pub url: String,
    /// The rewritten object key; the upload lands here, not at the requested key.
    pub key: String,
}

/// Issues presigned `PUT` URLs for unique object keys.
#[derive(Debug, Clone)]
pub struct UploadUrlIssuer<P> {
    presigner: P,
    expires_in: Duration,
}

impl<P: PresignPut> UploadUrlIssuer<P> {
    pub fn new(presigner: P, config: &StorageConfig) -> Self {
        Self {
            presigner,
            expires_in: config.expires_in(),
        }
    }

    /// Rewrites the requested key to a unique one and presigns a `PUT` for it.
    ///
    /// # Errors
    ///
    /// - [`crate::StorageError::KeyProcessing`] if the key cannot be made unique.
    /// - Whatever the presigner reports, normally [`crate::StorageError::Signing`].
    pub async fn issue(
        &self,
        request: &PresignedUrlRequest,
    ) -> StorageResult<PresignedUrlResponse> {
        let key = recordkit_ulid::unique_key(&request.key)?;

        let url = self
            .presigner
            .presign_put(&request.bucket, &key, self.expires_in)
            .await?;

        info!(
            bucket = %request.bucket,
            requested_key = %request.key,
            key = %key,
            expires_in = self.expires_in.as_secs(),
            "Presigned upload URL generated"
        );

        Ok(PresignedUrlResponse { url, key })
    }
}

/// Issues an upload URL using the ambient AWS configuration and default settings.
///
/// # Errors
///
/// [`crate::StorageError::Configuration`], [`crate::StorageError::KeyProcessing`] or
/// [`crate::StorageError::Signing`].
pub async fn get_presigned_url_v2(
    request: &PresignedUrlRequest,
) -> StorageResult<PresignedUrlResponse> {
    let config = StorageConfig::default();
    let presigner = S3Presigner::from_env(&config).await?;
    UploadUrlIssuer::new(presigner, &config).issue(request).await
}
