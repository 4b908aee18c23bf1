use crate::utils::error::{Result, TogrowError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TogrowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TogrowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(TogrowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(TogrowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(TogrowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| TogrowError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TogrowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TogrowError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 時區偏移以整點小時計，範圍與 chrono `FixedOffset` 一致。
pub fn validate_utc_offset(field_name: &str, hours: i32) -> Result<()> {
    validate_range(field_name, hours, -12, 14)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("catalog.path", "./data/plants.json").is_ok());
        assert!(validate_path("catalog.path", "").is_err());
        assert!(validate_path("catalog.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("guides.default_limit", 6, 1).is_ok());
        assert!(validate_positive_number("guides.default_limit", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("catalog.path", "plants.json", &["json", "csv"]).is_ok());
        assert!(validate_file_extension("catalog.path", "PLANTS.CSV", &["json", "csv"]).is_ok());
        assert!(validate_file_extension("catalog.path", "plants.txt", &["json", "csv"]).is_err());
        assert!(validate_file_extension("catalog.path", "plants", &["json", "csv"]).is_err());
    }

    #[test]
    fn test_validate_utc_offset() {
        assert!(validate_utc_offset("calendar.utc_offset_hours", 8).is_ok());
        assert!(validate_utc_offset("calendar.utc_offset_hours", -12).is_ok());
        assert!(validate_utc_offset("calendar.utc_offset_hours", 15).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("bucket".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("CATALOG_BUCKET", &present).unwrap(), "bucket");
        assert!(matches!(
            validate_required_field("CATALOG_BUCKET", &missing),
            Err(TogrowError::MissingConfigError { .. })
        ));
    }
}
