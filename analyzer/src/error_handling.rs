use thiserror::Error;

/// Lỗi của scoring client.
///
/// Chỉ có một loại lỗi: lỗi mạng, HTTP không phải 2xx và body không decode
/// được đều gộp vào `RequestFailed`. `status` chỉ dùng để ghi log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("request failed: {reason}")]
    RequestFailed {
        reason: String,
        status: Option<u16>,
    },
}

impl ScoringError {
    pub fn request_failed(reason: impl Into<String>) -> Self {
        ScoringError::RequestFailed {
            reason: reason.into(),
            status: None,
        }
    }

    pub fn with_status(reason: impl Into<String>, status: u16) -> Self {
        ScoringError::RequestFailed {
            reason: reason.into(),
            status: Some(status),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ScoringError::RequestFailed { status, .. } => *status,
        }
    }
}

impl From<reqwest::Error> for ScoringError {
    fn from(err: reqwest::Error) -> Self {
        ScoringError::RequestFailed {
            status: err.status().map(|s| s.as_u16()),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ScoringError {
    fn from(err: serde_json::Error) -> Self {
        ScoringError::request_failed(format!("invalid response body: {}", err))
    }
}
