// Re-exports for common crate
pub mod prelude {
    pub use crate::error::*;
    pub use crate::logger::{DiagnosticLog, LogLevel};
    pub use crate::types::*;
}

// Modules paths - tất cả các module trong src
pub mod error;
pub mod logger;
pub mod types;

// Re-exports
pub use error::{CommonError, CommonResult};
pub use logger::{init_tracing, DiagnosticEntry, DiagnosticLog, LogLevel, LoggingConfig};
pub use types::{ErrorDetail, Keyword, ScoreRequest, ScoreResponse, SentimentScore};
