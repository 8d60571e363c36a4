//! Presigned upload URLs for S3-compatible object storage.
//!
//! The issuer never uploads anything itself. It rewrites the requested object key so that it
//! is unique (see [`recordkit_ulid::unique_key`]) and asks a [`PresignPut`] implementation for a
//! short-lived URL that authorises a single HTTP `PUT` of that key.
//!
//! Credentials are an injected dependency: [`S3Presigner::from_env`] resolves the ambient AWS
//! chain (environment, shared profile, instance metadata), [`S3Presigner::with_static_credentials`]
//! targets an explicit endpoint such as MinIO, and tests substitute their own [`PresignPut`].

mod config;
mod issuer;
mod s3;

pub use config::{S3Config, StorageConfig, DEFAULT_PRESIGN_EXPIRY, MAX_PRESIGN_EXPIRY};
pub use issuer::{
    get_presigned_url_v2, PresignedUrlRequest, PresignedUrlResponse, UploadUrlIssuer,
};
pub use s3::{PresignPut, S3Presigner};

/// Errors returned by presigned URL issuance.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Ambient or explicit configuration could not be used (credentials, region, expiry).
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// The object key could not be made unique.
    #[error("failed to process object key: {0}")]
    KeyProcessing(#[from] recordkit_ulid::UlidError),

    /// The storage service rejected the signing request.
    #[error("failed to sign upload request: {0}")]
    Signing(String),
}

/// Type alias for Results that can fail with a [`StorageError`].
pub type StorageResult<T> = Result<T, StorageError>;
