use crate::adapters::gateway::Route;
use crate::core::{ConfigProvider, Storage};
use crate::core::matcher::DEFAULT_GUIDE_LIMIT;
use crate::core::service::DEFAULT_UTC_OFFSET_HOURS;
use crate::utils::error::{Result, TogrowError};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_positive_number,
    validate_utc_offset, Validate,
};
use aws_sdk_s3::Client as S3Client;
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub catalog_bucket: String,
    pub catalog_key: String,
    pub s3_region: String,
    pub utc_offset_hours: i32,
    pub default_guide_limit: usize,
    /// 單一函數部署時固定的路由 (`getSolarTerm` / `plantGuides` / `health`)
    pub route: Option<String>,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            catalog_bucket: env::var("CATALOG_BUCKET").map_err(|_| {
                TogrowError::MissingConfigError {
                    field: "CATALOG_BUCKET".to_string(),
                }
            })?,
            catalog_key: env::var("CATALOG_KEY").unwrap_or_else(|_| "plants.json".to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "ap-east-1".to_string()),
            utc_offset_hours: parse_env("UTC_OFFSET_HOURS", DEFAULT_UTC_OFFSET_HOURS)?,
            default_guide_limit: parse_env("DEFAULT_GUIDE_LIMIT", DEFAULT_GUIDE_LIMIT)?,
            route: env::var("TOGROW_ROUTE").ok().filter(|r| !r.trim().is_empty()),
        })
    }

    pub fn fixed_route(&self) -> Result<Option<Route>> {
        match self.route.as_deref() {
            None => Ok(None),
            Some(name) => Route::from_name(name).map(Some).ok_or_else(|| {
                TogrowError::InvalidConfigValueError {
                    field: "TOGROW_ROUTE".to_string(),
                    value: name.to_string(),
                    reason: "Expected getSolarTerm, plantGuides or health".to_string(),
                }
            }),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| TogrowError::InvalidConfigValueError {
                field: name.to_string(),
                value: raw.clone(),
                reason: "Value cannot be parsed".to_string(),
            }),
        Err(_) => Ok(default),
    }
}

impl ConfigProvider for LambdaConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog_key
    }

    fn utc_offset_hours(&self) -> i32 {
        self.utc_offset_hours
    }

    fn default_guide_limit(&self) -> usize {
        self.default_guide_limit
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_s3_bucket_name("CATALOG_BUCKET", &self.catalog_bucket)?;
        validate_file_extension("CATALOG_KEY", &self.catalog_key, &["json", "csv"])?;
        validate_aws_region("S3_REGION", &self.s3_region)?;
        validate_utc_offset("UTC_OFFSET_HOURS", self.utc_offset_hours)?;
        validate_positive_number("DEFAULT_GUIDE_LIMIT", self.default_guide_limit, 1)?;
        self.fixed_route()?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(TogrowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(TogrowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(TogrowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(TogrowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

impl Storage for S3Storage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| TogrowError::StorageError {
                message: format!("Failed to read s3://{}/{}: {}", self.bucket, path, e),
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| TogrowError::StorageError {
                message: format!("Failed to collect S3 data: {}", e),
            })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|e| TogrowError::StorageError {
                message: format!("Failed to write s3://{}/{}: {}", self.bucket, path, e),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LambdaConfig {
        LambdaConfig {
            catalog_bucket: "togrow-catalog".to_string(),
            catalog_key: "plants.json".to_string(),
            s3_region: "ap-east-1".to_string(),
            utc_offset_hours: 8,
            default_guide_limit: 6,
            route: None,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_invalid_bucket_and_route() {
        let mut bad_bucket = config();
        bad_bucket.catalog_bucket = "Togrow_Catalog".to_string();
        assert!(bad_bucket.validate().is_err());

        let mut bad_route = config();
        bad_route.route = Some("getPosts".to_string());
        assert!(bad_route.validate().is_err());

        let mut fixed = config();
        fixed.route = Some("plantGuides".to_string());
        assert_eq!(fixed.fixed_route().unwrap(), Some(Route::PlantGuides));
    }
}
