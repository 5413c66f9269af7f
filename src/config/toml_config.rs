use crate::adapters::http::DEFAULT_API_ENDPOINT;
use crate::domain::ports::ConfigProvider;
use crate::domain::query::DEFAULT_ITEMS_PER_PAGE;
use crate::utils::error::{Result, SpooferError};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_PATH: &str = "./Data";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpooferConfig {
    pub api: ApiConfig,
    pub output: OutputConfig,
    pub collection: CollectionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    pub items_per_page: i64,
    /// Scope collection queries to sessions from today onwards unless a
    /// lower date bound is given.
    pub recent_only: bool,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            recent_only: true,
        }
    }
}

impl SpooferConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| SpooferError::config("toml_parsing", format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${SPOOFER_API})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| SpooferError::config("toml_parsing", e.to_string()))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for SpooferConfig {
    fn api_endpoint(&self) -> &str {
        &self.api.endpoint
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds
    }
}

impl Validate for SpooferConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.endpoint", &self.api.endpoint)?;
        validate_positive_number("api.timeout_seconds", self.api.timeout_seconds, 1)?;
        validate_path("output.path", &self.output.path)?;
        validate_positive_number("collection.items_per_page", self.collection.items_per_page, 1)?;
        Ok(())
    }
}
