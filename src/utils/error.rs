use thiserror::Error;

#[derive(Error, Debug)]
pub enum HrError {
    #[error("Insufficient candidates: requested {requested}, only {available} left")]
    InsufficientCandidates { requested: usize, available: usize },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Draw,
    Io,
    Data,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HrError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HrError::InsufficientCandidates { .. } => ErrorCategory::Draw,
            HrError::IoError(_) => ErrorCategory::Io,
            HrError::CsvError(_) | HrError::SerializationError(_) => ErrorCategory::Data,
            HrError::ConfigError { .. }
            | HrError::ConfigValidationError { .. }
            | HrError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            HrError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    /// 嚴重程度，CLI 依此決定退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 抽籤被中止但狀態未變動，使用者調整後可直接重試
            HrError::InsufficientCandidates { .. } => ErrorSeverity::Medium,
            HrError::IoError(_) => ErrorSeverity::Critical,
            HrError::CsvError(_) | HrError::SerializationError(_) => ErrorSeverity::High,
            HrError::ConfigError { .. }
            | HrError::ConfigValidationError { .. }
            | HrError::InvalidConfigValueError { .. }
            | HrError::ValidationError { .. } => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HrError::InsufficientCandidates { .. } => "剩餘候選人不足！".to_string(),
            HrError::IoError(e) => format!("檔案讀寫失敗: {}", e),
            HrError::CsvError(e) => format!("CSV 產生失敗: {}", e),
            HrError::SerializationError(e) => format!("JSON 輸出失敗: {}", e),
            HrError::ConfigError { message } => format!("設定錯誤: {}", message),
            HrError::ConfigValidationError { field, message } => {
                format!("設定 {} 無效: {}", field, message)
            }
            HrError::InvalidConfigValueError { field, value, reason } => {
                format!("設定 {} 的值 '{}' 無效: {}", field, value, reason)
            }
            HrError::ValidationError { message } => format!("輸入驗證失敗: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            HrError::InsufficientCandidates { available, .. } => format!(
                "降低抽取人數至 {} 以下、開啟允許重複中獎，或重置名單",
                available
            ),
            HrError::IoError(_) => "確認檔案路徑存在且有讀寫權限".to_string(),
            HrError::CsvError(_) | HrError::SerializationError(_) => {
                "確認名單內容為有效的 UTF-8 文字".to_string()
            }
            HrError::ConfigError { .. }
            | HrError::ConfigValidationError { .. }
            | HrError::InvalidConfigValueError { .. } => {
                "檢查 TOML 設定檔與命令列參數".to_string()
            }
            HrError::ValidationError { .. } => {
                "名單請使用 .txt 或 .csv 檔，或改由標準輸入貼上".to_string()
            }
        }
    }

    /// 依嚴重程度對應的退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, HrError>;
