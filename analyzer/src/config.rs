use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use dotenv::dotenv;
use url::Url;
use sentiment_common::{CommonError, CommonResult, LoggingConfig};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_SCORE_PATH: &str = "/get_score";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    // Scoring service
    pub api_url: String,
    pub score_path: String,

    // Logging
    pub log_dir: PathBuf,
    pub log_to_stderr: bool,

    // Gọi GET / khi khởi động để cảnh báo nếu service chưa chạy
    pub health_check: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            score_path: DEFAULT_SCORE_PATH.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_to_stderr: false,
            health_check: true,
        }
    }

    /// Cấu hình trỏ tới một base URL khác, giữ các giá trị mặc định còn lại
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::new()
        }
    }

    pub fn from_env() -> CommonResult<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Đọc cấu hình từ một nguồn key/value bất kỳ
    pub fn from_lookup<F>(lookup: F) -> CommonResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = AppConfig {
            api_url: lookup("SENTIMENT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            score_path: lookup("SENTIMENT_SCORE_PATH").unwrap_or_else(|| DEFAULT_SCORE_PATH.to_string()),
            log_dir: PathBuf::from(lookup("SENTIMENT_LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())),
            log_to_stderr: parse_bool("SENTIMENT_LOG_STDERR", lookup("SENTIMENT_LOG_STDERR"), false)?,
            health_check: parse_bool("SENTIMENT_HEALTH_CHECK", lookup("SENTIMENT_HEALTH_CHECK"), true)?,
        };

        // Kiểm tra URL ngay khi tải cấu hình
        config.score_url()?;
        Ok(config)
    }

    pub fn base_url(&self) -> CommonResult<Url> {
        Url::parse(&self.api_url)
            .map_err(|e| CommonError::Config(format!("SENTIMENT_API_URL không hợp lệ '{}': {}", self.api_url, e)))
    }

    /// URL đầy đủ của endpoint chấm điểm
    pub fn score_url(&self) -> CommonResult<Url> {
        self.base_url()?
            .join(&self.score_path)
            .map_err(|e| CommonError::Config(format!("SENTIMENT_SCORE_PATH không hợp lệ '{}': {}", self.score_path, e)))
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            log_dir: self.log_dir.clone(),
            log_to_stderr: self.log_to_stderr,
            ..LoggingConfig::default()
        }
    }
}

fn parse_bool(key: &str, value: Option<String>, default: bool) -> CommonResult<bool> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CommonError::Config(format!("{} phải là true hoặc false, nhận được '{}'", key, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.score_url().unwrap().as_str(), "http://127.0.0.1:8000/get_score");
        assert!(config.health_check);
        assert!(!config.log_to_stderr);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SENTIMENT_API_URL", "http://scores.local:9000"),
            ("SENTIMENT_SCORE_PATH", "/v2/score"),
            ("SENTIMENT_HEALTH_CHECK", "false"),
            ("SENTIMENT_LOG_DIR", "/tmp/sentiment"),
        ]))
        .unwrap();
        assert_eq!(config.score_url().unwrap().as_str(), "http://scores.local:9000/v2/score");
        assert!(!config.health_check);
        assert_eq!(config.logging().log_dir, PathBuf::from("/tmp/sentiment"));
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup_from(&[("SENTIMENT_API_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, CommonError::Config(_)));

        let err = AppConfig::from_lookup(lookup_from(&[("SENTIMENT_HEALTH_CHECK", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("SENTIMENT_HEALTH_CHECK"));
    }
}
