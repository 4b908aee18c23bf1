use crate::adapters::catalog::CatalogFormat;
use crate::core::matcher::DEFAULT_GUIDE_LIMIT;
use crate::core::service::DEFAULT_UTC_OFFSET_HOURS;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TogrowError};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, validate_utc_offset, Validate,
};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub catalog: CatalogSection,
    pub calendar: Option<CalendarSection>,
    pub guides: Option<GuidesSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    pub bind: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSection {
    pub path: String,
    pub format: Option<CatalogFormat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarSection {
    pub utc_offset_hours: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuidesSection {
    pub default_limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl ServerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TogrowError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TogrowError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_PATH})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("server.bind", self.bind())?;
        validate_range("server.port", self.port(), 1, u16::MAX)?;

        validate_path("catalog.path", &self.catalog.path)?;
        if self.catalog.format.is_none() {
            validate_file_extension("catalog.path", &self.catalog.path, &["json", "csv"])?;
        }

        validate_utc_offset("calendar.utc_offset_hours", self.utc_offset_hours())?;
        validate_positive_number("guides.default_limit", self.default_guide_limit(), 1)?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level()) {
            return Err(TogrowError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.log_level().to_string(),
                reason: format!("Valid levels: {}", valid_levels.join(", ")),
            });
        }

        Ok(())
    }

    pub fn bind(&self) -> &str {
        self.server.bind.as_deref().unwrap_or("0.0.0.0")
    }

    pub fn port(&self) -> u16 {
        self.server.port.unwrap_or(3000)
    }

    /// 明確設定優先，否則依副檔名判斷。
    pub fn catalog_format(&self) -> Option<CatalogFormat> {
        self.catalog
            .format
            .or_else(|| CatalogFormat::from_path(&self.catalog.path))
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }
}

impl ConfigProvider for ServerConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog.path
    }

    fn utc_offset_hours(&self) -> i32 {
        self.calendar
            .as_ref()
            .and_then(|c| c.utc_offset_hours)
            .unwrap_or(DEFAULT_UTC_OFFSET_HOURS)
    }

    fn default_guide_limit(&self) -> usize {
        self.guides
            .as_ref()
            .and_then(|g| g.default_limit)
            .unwrap_or(DEFAULT_GUIDE_LIMIT)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
