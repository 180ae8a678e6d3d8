// Standard library imports
use std::{
    path::PathBuf,
    sync::{Arc, RwLock},
};

// Third party imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

// Internal imports
use crate::error::{CommonError, CommonResult};

/// Mức độ log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    /// Debug
    Debug,
    /// Info
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
}

/// Một dòng trên kênh chẩn đoán
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    /// Mức độ log
    pub level: LogLevel,
    /// Nội dung log
    pub message: String,
    /// Thời gian tạo
    pub created_at: DateTime<Utc>,
}

/// Kênh chẩn đoán.
///
/// Mỗi bản ghi được phát qua `tracing` và đồng thời giữ lại trong bộ nhớ,
/// để phía gọi (và test) có thể kiểm tra lỗi mà không cần đọc file log.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Arc<RwLock<Vec<DiagnosticEntry>>>,
}

impl DiagnosticLog {
    /// Tạo kênh chẩn đoán mới
    pub fn new() -> Self {
        Self::default()
    }

    /// Ghi log
    pub fn record(&self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Debug => debug!(target: "diagnostics", "{}", message),
            LogLevel::Info => info!(target: "diagnostics", "{}", message),
            LogLevel::Warning => warn!(target: "diagnostics", "{}", message),
            LogLevel::Error => error!(target: "diagnostics", "{}", message),
        }

        let entry = DiagnosticEntry {
            level,
            message,
            created_at: Utc::now(),
        };
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.push(entry);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.record(LogLevel::Error, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.record(LogLevel::Warning, message);
    }

    /// Lấy toàn bộ log
    pub fn entries(&self) -> Vec<DiagnosticEntry> {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Lấy các log mức Error
    pub fn errors(&self) -> Vec<DiagnosticEntry> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|entry| entry.level == LogLevel::Error)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Xóa log
    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

/// Cấu hình logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Thư mục chứa file log
    pub log_dir: PathBuf,
    /// Tên file log (xoay vòng theo ngày)
    pub file_name: String,
    /// Ghi thêm ra stderr
    pub log_to_stderr: bool,
    /// Filter mặc định khi không có RUST_LOG
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            file_name: "sentiment.log".to_string(),
            log_to_stderr: false,
            default_filter: "info".to_string(),
        }
    }
}

/// Thiết lập tracing subscriber toàn cục.
///
/// Guard trả về phải được giữ đến khi chương trình kết thúc, nếu không các
/// dòng log còn trong buffer của writer non-blocking sẽ bị mất.
pub fn init_tracing(config: &LoggingConfig) -> CommonResult<WorkerGuard> {
    if !config.log_dir.exists() {
        std::fs::create_dir_all(&config.log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, &config.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = config.log_to_stderr.then(|| {
        fmt::Layer::new()
            .with_writer(std::io::stderr)
            .with_ansi(true)
    });

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.default_filter)),
        )
        .with(stderr_layer)
        .with(
            fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE),
        )
        .try_init()
        .map_err(|e| CommonError::Config(format!("Không thể khởi tạo tracing: {}", e)))?;

    Ok(guard)
}

/// Module tests
#[cfg(test)]
mod tests {
    use super::*;

    /// Test DiagnosticLog
    #[test]
    fn test_diagnostic_log() {
        let log = DiagnosticLog::new();
        assert!(log.is_empty());

        log.record(LogLevel::Info, "started");
        log.error("request failed: connection refused");
        log.warning("health check failed");

        assert_eq!(log.len(), 3);
        let errors = log.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "request failed: connection refused");
        assert_eq!(errors[0].level, LogLevel::Error);
    }

    /// Test clone dùng chung bộ nhớ
    #[test]
    fn test_diagnostic_log_shared() {
        let log = DiagnosticLog::new();
        let other = log.clone();
        other.error("boom");
        assert_eq!(log.errors().len(), 1);

        log.clear();
        assert!(other.is_empty());
    }

    /// Test LoggingConfig
    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.file_name, "sentiment.log");
        assert!(!config.log_to_stderr);
    }
}
