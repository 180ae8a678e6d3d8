// Standard library imports
use std::sync::Arc;

// Third party imports
use tokio::sync::mpsc;
use tracing::{debug, info};

// Internal imports
use crate::error_handling::ScoringError;
use crate::scoring_client::ScoreProvider;
use crate::view::SentimentView;
use sentiment_common::{DiagnosticLog, Keyword, SentimentScore};

/// Kết quả của một request, gửi về qua channel
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEvent {
    pub request_id: u64,
    /// Keyword tại thời điểm gửi
    pub keyword: Keyword,
    pub result: Result<SentimentScore, ScoringError>,
}

/// Điều gì đã xảy ra với view sau khi áp dụng một `ScoreEvent`
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Scored { request_id: u64, score: SentimentScore },
    Failed { request_id: u64 },
}

/// Đầu nhận của channel kết quả
#[derive(Debug)]
pub struct Completions {
    rx: mpsc::UnboundedReceiver<ScoreEvent>,
}

impl Completions {
    /// Chờ kết quả tiếp theo. Chỉ trả `None` khi app đã bị drop.
    pub async fn next(&mut self) -> Option<ScoreEvent> {
        self.rx.recv().await
    }

    /// Lấy kết quả đã về mà không chờ
    pub fn try_next(&mut self) -> Option<ScoreEvent> {
        self.rx.try_recv().ok()
    }
}

/// Controller của màn hình Sentiment Analyzer.
///
/// Chỉ có app được sửa view. Request chạy trên task riêng và kết quả quay về
/// qua `Completions`; kết quả được áp dụng theo thứ tự về, không theo thứ tự
/// gửi, nên response cũ về sau vẫn ghi đè response mới.
pub struct SentimentApp<P: ScoreProvider + ?Sized> {
    view: SentimentView,
    provider: Arc<P>,
    diagnostics: DiagnosticLog,
    next_request_id: u64,
    tx: mpsc::UnboundedSender<ScoreEvent>,
}

impl<P: ScoreProvider + ?Sized> SentimentApp<P> {
    pub fn new(provider: Arc<P>, diagnostics: DiagnosticLog) -> (Self, Completions) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Self {
            view: SentimentView::new(),
            provider,
            diagnostics,
            next_request_id: 0,
            tx,
        };
        (app, Completions { rx })
    }

    pub fn view(&self) -> &SentimentView {
        &self.view
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Sửa keyword (mỗi lần gõ phím)
    pub fn edit_keyword(&mut self, text: impl Into<String>) {
        self.view.set_keyword(text);
    }

    /// Gửi keyword hiện tại đi chấm điểm.
    ///
    /// Đúng một request cho mỗi lần gọi, không debounce, không hủy request
    /// đang chạy. Phải gọi trong tokio runtime.
    pub fn submit(&mut self) -> u64 {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        let keyword = self.view.keyword().clone();
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();

        debug!("Gửi request #{} cho keyword {:?}", request_id, keyword.as_str());

        tokio::spawn(async move {
            let result = provider.fetch_score(&keyword).await;
            // Receiver chỉ mất khi app đã đóng, bỏ qua kết quả
            let _ = tx.send(ScoreEvent {
                request_id,
                keyword,
                result,
            });
        });

        request_id
    }

    /// Áp dụng kết quả lên view. Lỗi chỉ ghi vào kênh chẩn đoán.
    pub fn apply(&mut self, event: ScoreEvent) -> Outcome {
        match event.result {
            Ok(score) => {
                info!(
                    "Request #{} keyword {:?} -> {}",
                    event.request_id,
                    event.keyword.as_str(),
                    score
                );
                self.view.apply_score(score.clone());
                Outcome::Scored {
                    request_id: event.request_id,
                    score,
                }
            }
            Err(e) => {
                self.diagnostics.error(format!(
                    "Request #{} cho keyword {:?} thất bại: {}",
                    event.request_id,
                    event.keyword.as_str(),
                    e
                ));
                Outcome::Failed {
                    request_id: event.request_id,
                }
            }
        }
    }

    /// Áp dụng mọi kết quả đã về
    pub fn apply_ready(&mut self, completions: &mut Completions) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Some(event) = completions.try_next() {
            outcomes.push(self.apply(event));
        }
        outcomes
    }
}
