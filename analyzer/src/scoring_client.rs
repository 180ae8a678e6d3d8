// Standard library imports
use std::{sync::Arc, time::Duration};

// Third party imports
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use url::Url;

// Internal imports
use crate::config::AppConfig;
use crate::error_handling::ScoringError;
use sentiment_common::{CommonResult, DiagnosticLog, ErrorDetail, Keyword, ScoreRequest, ScoreResponse, SentimentScore};

/// Interface cho nguồn điểm sentiment
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreProvider: Send + Sync + 'static {
    /// Lấy điểm sentiment cho một keyword. Mỗi lần gọi là đúng một request.
    async fn fetch_score(&self, keyword: &Keyword) -> Result<SentimentScore, ScoringError>;
}

/// Client HTTP tới scoring service.
///
/// Không retry, không timeout: lỗi nào cũng trả về ngay cho phía gọi.
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    client: Client,
    base_url: Url,
    score_url: Url,
}

impl HttpScoringClient {
    pub fn new(config: &AppConfig) -> CommonResult<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: config.base_url()?,
            score_url: config.score_url()?,
        })
    }

    pub fn score_url(&self) -> &Url {
        &self.score_url
    }

    /// Gọi `GET /` của service, trả về nội dung body
    pub async fn check_health(&self) -> Result<String, ScoringError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Thời gian chờ tối đa cho health check lúc khởi động
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Chạy health check trên task riêng, có giới hạn thời gian.
///
/// Không chặn việc hiển thị view hay gửi request chấm điểm; kết quả xấu chỉ
/// ghi warning vào kênh chẩn đoán. Task trả `true` khi service trả lời 2xx.
pub fn spawn_health_check(
    client: Arc<HttpScoringClient>,
    diagnostics: DiagnosticLog,
    limit: Duration,
) -> JoinHandle<bool> {
    tokio::spawn(async move {
        match tokio::time::timeout(limit, client.check_health()).await {
            Ok(Ok(body)) => {
                info!("Scoring service sẵn sàng: {}", body.trim());
                true
            }
            Ok(Err(e)) => {
                diagnostics.warning(format!("Không kết nối được scoring service: {}", e));
                false
            }
            Err(_) => {
                diagnostics.warning(format!(
                    "Scoring service không phản hồi health check sau {:?}",
                    limit
                ));
                false
            }
        }
    })
}

#[async_trait]
impl ScoreProvider for HttpScoringClient {
    async fn fetch_score(&self, keyword: &Keyword) -> Result<SentimentScore, ScoringError> {
        debug!("POST {} keyword={:?}", self.score_url, keyword.as_str());

        let response = self
            .client
            .post(self.score_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&ScoreRequest::new(keyword))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Service trả {"detail": "..."} khi lỗi, dùng nó cho log nếu có
            let reason = serde_json::from_str::<ErrorDetail>(&body)
                .map(|d| d.detail)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(ScoringError::with_status(reason, status.as_u16()));
        }

        let parsed: ScoreResponse = serde_json::from_str(&body)?;
        Ok(parsed.data)
    }
}
