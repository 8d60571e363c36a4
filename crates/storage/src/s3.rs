//! S3 presigner implementation.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::{provider::ProvideCredentials, Credentials};
use aws_sdk_s3::{
    config::Region, error::DisplayErrorContext, presigning::PresigningConfig, Client,
};
use tracing::{debug, error, info};

use crate::{S3Config, StorageConfig, StorageError, StorageResult};

/// Produces a signed URL authorising one `PUT` of `bucket`/`key`.
#[async_trait]
pub trait PresignPut: Send + Sync {
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;
}

/// Presigner backed by the AWS S3 SDK.
#[derive(Clone, Debug)]
pub struct S3Presigner {
    client: Client,
}

impl S3Presigner {
    /// Build a presigner from the ambient AWS configuration.
    ///
    /// Credentials are resolved eagerly so that a missing or broken credential chain is
    /// reported here rather than as a signing failure later.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if no credentials or no region can be resolved.
    pub async fn from_env(config: &StorageConfig) -> StorageResult<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = config.region() {
            loader = loader.region(Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;

        let provider = sdk_config.credentials_provider().ok_or_else(|| {
            StorageError::Configuration("no AWS credentials provider configured".to_string())
        })?;
        provider.provide_credentials().await.map_err(|e| {
            error!(error = %DisplayErrorContext(&e), "Failed to resolve AWS credentials");
            StorageError::Configuration(format!(
                "failed to resolve AWS credentials: {}",
                DisplayErrorContext(&e)
            ))
        })?;

        if sdk_config.region().is_none() {
            return Err(StorageError::Configuration(
                "no AWS region configured".to_string(),
            ));
        }

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style());
        if let Some(endpoint) = config.endpoint() {
            builder = builder.endpoint_url(endpoint);
        }

        info!(
            region = ?sdk_config.region(),
            endpoint = ?config.endpoint(),
            "S3 presigner initialised from environment"
        );

        Ok(Self {
            client: Client::from_conf(builder.build()),
        })
    }

    /// Build a presigner for an explicit S3-compatible endpoint with static credentials.
    pub fn with_static_credentials(config: &S3Config) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "recordkit-static",
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint)
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        info!(endpoint = %config.endpoint, region = %config.region, "S3 presigner initialised");

        Self {
            client: Client::from_conf(s3_config),
        }
    }
}

#[async_trait]
impl PresignPut for S3Presigner {
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        debug!(bucket, key, expires_in = expires_in.as_secs(), "Presigning PUT");

        let presigning_config = PresigningConfig::expires_in(expires_in).map_err(|e| {
            StorageError::Configuration(format!("Invalid presign duration: {e}"))
        })?;

        let presigned = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| {
                error!(bucket, key, error = %DisplayErrorContext(&e), "S3 presign failed");
                StorageError::Signing(DisplayErrorContext(&e).to_string())
            })?;

        Ok(presigned.uri().to_string())
    }
}
