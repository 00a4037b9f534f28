use crate::core::animation::DEFAULT_MAX_FRAMES;
use crate::core::app_state::DEFAULT_DEBOUNCE;
use crate::core::export::DEFAULT_HEADER;
use crate::core::grouping::DEFAULT_LABEL_TEMPLATE;
use crate::core::scheduler::DEFAULT_FRAME_INTERVAL;
use crate::domain::model::DrawSettings;
use crate::utils::error::{HrError, Result};
use crate::utils::validation::{
    validate_group_size, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub draw: DrawConfig,
    pub grouping: GroupingConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub draw_count: Option<usize>,
    pub allow_repeat: Option<bool>,
    pub max_frames: Option<u32>,
    pub frame_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    pub group_size: Option<usize>,
    pub label_template: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: Option<String>,
    pub filename_prefix: Option<String>,
    pub date_format: Option<String>,
    pub header: Option<Vec<String>>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HrError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HrError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HrError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_positive_number("draw.draw_count", self.draw_count(), 1)?;
        validate_range("draw.max_frames", self.max_frames(), 1, 10_000)?;
        validate_group_size("grouping.group_size", self.group_size())?;

        let template = self.label_template();
        if !template.contains("{n}") {
            return Err(HrError::InvalidConfigValueError {
                field: "grouping.label_template".to_string(),
                value: template.to_string(),
                reason: "Template must contain {n}".to_string(),
            });
        }

        validate_path("export.output_path", self.output_path())?;
        validate_non_empty_string("export.filename_prefix", self.filename_prefix())?;
        validate_non_empty_string("export.date_format", self.date_format())?;

        if let Some(header) = &self.export.header {
            if header.len() != 2 {
                return Err(HrError::InvalidConfigValueError {
                    field: "export.header".to_string(),
                    value: header.join(","),
                    reason: "Header must have exactly two columns".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        self.input
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE)
    }

    pub fn draw_count(&self) -> usize {
        self.draw.draw_count.unwrap_or(1)
    }

    pub fn allow_repeat(&self) -> bool {
        self.draw.allow_repeat.unwrap_or(false)
    }

    pub fn draw_settings(&self) -> DrawSettings {
        DrawSettings {
            draw_count: self.draw_count(),
            allow_repeat: self.allow_repeat(),
        }
    }

    pub fn max_frames(&self) -> u32 {
        self.draw.max_frames.unwrap_or(DEFAULT_MAX_FRAMES)
    }

    pub fn frame_interval(&self) -> Duration {
        self.draw
            .frame_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_FRAME_INTERVAL)
    }

    pub fn group_size(&self) -> usize {
        self.grouping.group_size.unwrap_or(3)
    }

    pub fn label_template(&self) -> &str {
        self.grouping
            .label_template
            .as_deref()
            .unwrap_or(DEFAULT_LABEL_TEMPLATE)
    }

    pub fn output_path(&self) -> &str {
        self.export.output_path.as_deref().unwrap_or("./output")
    }

    pub fn filename_prefix(&self) -> &str {
        self.export.filename_prefix.as_deref().unwrap_or("分組結果")
    }

    pub fn date_format(&self) -> &str {
        self.export.date_format.as_deref().unwrap_or("%Y-%m-%d")
    }

    pub fn csv_header(&self) -> Vec<String> {
        self.export
            .header
            .clone()
            .unwrap_or_else(|| DEFAULT_HEADER.iter().map(|h| h.to_string()).collect())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
