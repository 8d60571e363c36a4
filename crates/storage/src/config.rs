//! Storage configuration.
//!
//! Resolved once by the host application and passed to the presigner and issuer; nothing in
//! this crate reads process-wide settings while handling a request, apart from the AWS
//! credential chain consulted by [`crate::S3Presigner::from_env`].

use crate::{StorageError, StorageResult};
use std::time::Duration;

/// Lifetime of a presigned URL when none is configured (the SDK's own default).
pub const DEFAULT_PRESIGN_EXPIRY: Duration = Duration::from_secs(15 * 60);

/// Longest lifetime SigV4 allows for a presigned URL.
pub const MAX_PRESIGN_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Presigning behaviour shared by every presigner.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    expires_in: Duration,
    region: Option<String>,
    endpoint: Option<String>,
    force_path_style: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            expires_in: DEFAULT_PRESIGN_EXPIRY,
            region: None,
            endpoint: None,
            force_path_style: false,
        }
    }
}

impl StorageConfig {
    /// Create a config with the given URL lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if `expires_in` is zero or longer than
    /// [`MAX_PRESIGN_EXPIRY`].
    pub fn new(expires_in: Duration) -> StorageResult<Self> {
        if expires_in.is_zero() || expires_in > MAX_PRESIGN_EXPIRY {
            return Err(StorageError::Configuration(format!(
                "presign expiry must be between 1s and {}s, got {}s",
                MAX_PRESIGN_EXPIRY.as_secs(),
                expires_in.as_secs()
            )));
        }

        Ok(Self {
            expires_in,
            ..Self::default()
        })
    }

    /// Override the region otherwise taken from the ambient configuration.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Send requests to an S3-compatible endpoint instead of AWS.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Address buckets as a path segment rather than a subdomain.
    pub fn with_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }

    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn force_path_style(&self) -> bool {
        self.force_path_style
    }
}

/// Explicit connection settings for an S3-compatible service (MinIO and friends).
#[derive(Debug, Clone)]
pub struct S3Config {
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl S3Config {
    /// Region used when the service does not care about one.
    pub const DEFAULT_REGION: &'static str = "us-east-1";

    /// Parse an endpoint URL such as `http://host:port/`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if the URL has no `http`/`https` scheme or no
    /// host.
    pub fn from_url(
        url: &str,
        access_key_id: String,
        secret_access_key: String,
    ) -> StorageResult<Self> {
        let endpoint = url.trim().trim_end_matches('/');

        let host = endpoint
            .strip_prefix("http://")
            .or_else(|| endpoint.strip_prefix("https://"))
            .ok_or_else(|| {
                StorageError::Configuration(format!(
                    "S3 endpoint must start with http:// or https://, got: '{url}'"
                ))
            })?;

        if host.is_empty() {
            return Err(StorageError::Configuration(
                "S3 endpoint must contain a host".to_string(),
            ));
        }

        Ok(Self {
            endpoint: endpoint.to_string(),
            region: Self::DEFAULT_REGION.to_string(),
            access_key_id,
            secret_access_key,
        })
    }

    /// Use a specific signing region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expiry() {
        let config = StorageConfig::default();

        assert_eq!(config.expires_in(), Duration::from_secs(900));
        assert!(config.region().is_none());
        assert!(!config.force_path_style());
    }

    #[test]
    fn test_new_rejects_out_of_range_expiry() {
        assert!(matches!(
            StorageConfig::new(Duration::ZERO),
            Err(StorageError::Configuration(_))
        ));
        assert!(matches!(
            StorageConfig::new(MAX_PRESIGN_EXPIRY + Duration::from_secs(1)),
            Err(StorageError::Configuration(_))
        ));
        assert!(StorageConfig::new(MAX_PRESIGN_EXPIRY).is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = StorageConfig::new(Duration::from_secs(60))
            .unwrap()
            .with_region("eu-west-2")
            .with_endpoint("http://localhost:9000")
            .with_path_style(true);

        assert_eq!(config.region(), Some("eu-west-2"));
        assert_eq!(config.endpoint(), Some("http://localhost:9000"));
        assert!(config.force_path_style());
    }

    #[test]
    fn test_s3_config_from_url() {
        let config =
            S3Config::from_url("http://minio:9000/", "key".into(), "secret".into()).unwrap();

        assert_eq!(config.endpoint, "http://minio:9000");
        assert_eq!(config.region, S3Config::DEFAULT_REGION);
    }

    #[test]
    fn test_s3_config_rejects_missing_scheme_or_host() {
        assert!(S3Config::from_url("minio:9000", "k".into(), "s".into()).is_err());
        assert!(S3Config::from_url("https://", "k".into(), "s".into()).is_err());
    }
}
