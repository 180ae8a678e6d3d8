// Third party imports
use thiserror::Error;

/// Lỗi chung
#[derive(Debug, Error)]
pub enum CommonError {
    /// Lỗi cấu hình
    #[error("Config error: {0}")]
    Config(String),
    /// Lỗi IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Kiểu kết quả chung
pub type CommonResult<T> = Result<T, CommonError>;
