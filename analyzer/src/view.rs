use sentiment_common::{Keyword, SentimentScore};

pub const TITLE: &str = "Sentiment Analyzer";
pub const PLACEHOLDER: &str = "Enter keyword";
pub const BUTTON_LABEL: &str = "Get sentiment score";

/// View-model của màn hình: keyword đang nhập và điểm nhận được gần nhất
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentView {
    keyword: Keyword,
    score: Option<SentimentScore>,
}

impl SentimentView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(&self) -> &Keyword {
        &self.keyword
    }

    pub fn score(&self) -> Option<SentimentScore> {
        self.score.clone()
    }

    pub fn set_keyword(&mut self, text: impl Into<String>) {
        self.keyword.set(text);
    }

    pub fn push_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.keyword.push_str(c.encode_utf8(&mut buf));
    }

    pub fn backspace(&mut self) {
        self.keyword.pop();
    }

    /// Thay điểm cũ bằng điểm mới, không cộng dồn. `null` xóa điểm đang hiển thị.
    pub fn apply_score(&mut self, score: SentimentScore) {
        self.score = if score.is_unset() { None } else { Some(score) };
    }

    /// Dòng kết quả, dùng keyword hiện tại chứ không phải keyword đã gửi
    pub fn score_text(&self) -> Option<String> {
        self.score
            .as_ref()
            .map(|score| format!("The sentiment score for {} is {}", self.keyword, score))
    }

    pub fn render(&self) -> String {
        let input = if self.keyword.is_empty() {
            format!("[ {} ]", PLACEHOLDER)
        } else {
            format!("[ {} ]", self.keyword)
        };

        format!(
            "{}\n{}\n<{}>\n{}",
            TITLE,
            input,
            BUTTON_LABEL,
            self.score_text().unwrap_or_default()
        )
    }
}
