use thiserror::Error;

#[derive(Error, Debug)]
pub enum TogrowError {
    #[error("Invalid date: month {month}, day {day}")]
    InvalidDate { month: u32, day: u32 },

    #[error("Invalid query parameter '{field}' = '{value}': {reason}")]
    InvalidQueryError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Data,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TogrowError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDate { .. } | Self::InvalidQueryError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::SerializationError(_) | Self::CsvError(_) | Self::CatalogError { .. } => {
                ErrorCategory::Data
            }
            Self::IoError(_) | Self::StorageError { .. } => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 呼叫端輸入錯誤 (HTTP 400)；其餘皆為伺服端錯誤。
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidDate { month, day } => format!("日期無效：{}月{}日", month, day),
            Self::InvalidQueryError { field, value, .. } => {
                format!("查詢參數 {} 的值無效：{}", field, value)
            }
            Self::MissingConfigError { field } => format!("缺少必要設定：{}", field),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("設定 {} 無效：{}", field, reason)
            }
            Self::ConfigError { message } | Self::ConfigValidationError { message, .. } => {
                format!("設定錯誤：{}", message)
            }
            Self::CatalogError { .. } | Self::SerializationError(_) | Self::CsvError(_) => {
                "植物指南目錄無法解析".to_string()
            }
            Self::IoError(_) | Self::StorageError { .. } => "讀取或寫入資料失敗".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "請確認日期格式為 YYYY-MM-DD，且月份與日期有效",
            ErrorCategory::Configuration => "請檢查設定檔或命令列參數",
            ErrorCategory::Data => "請確認目錄檔案格式 (JSON 陣列或含標題列的 CSV)",
            ErrorCategory::Io => "請確認檔案路徑存在且具有讀寫權限",
        }
    }
}

pub type Result<T> = std::result::Result<T, TogrowError>;
