// Standard library imports
use std::fmt;

// Third party imports
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Từ khóa người dùng nhập vào.
///
/// Giữ nguyên văn bản gốc: không trim, không lowercase, có thể rỗng.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    /// Tạo keyword mới
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Thay toàn bộ nội dung
    pub fn set(&mut self, text: impl Into<String>) {
        self.0 = text.into();
    }

    pub fn push_str(&mut self, text: &str) {
        self.0.push_str(text);
    }

    /// Xóa ký tự cuối (phím backspace)
    pub fn pop(&mut self) -> Option<char> {
        self.0.pop()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Keyword {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Keyword {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Điểm sentiment do scoring service trả về.
///
/// Giá trị là opaque: thường là số, nhưng chuỗi, bool... cũng được giữ và hiển
/// thị nguyên trạng. `null` nghĩa là chưa có điểm.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentimentScore(Value);

impl SentimentScore {
    pub fn new(value: f64) -> Self {
        Self(Value::from(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.0.as_f64()
    }

    /// Service trả `null`: view quay về trạng thái chưa có điểm
    pub fn is_unset(&self) -> bool {
        self.0.is_null()
    }
}

// Số so sánh theo giá trị f64, để `5` và `5.0` bằng nhau
impl PartialEq for SentimentScore {
    fn eq(&self, other: &Self) -> bool {
        match (self.0.as_f64(), other.0.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => self.0 == other.0,
        }
    }
}

impl fmt::Display for SentimentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_js_value(f, &self.0)
    }
}

/// In giá trị JSON giống `${value}` trong template string của JS
fn write_js_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Number(n) => match n.as_f64() {
            Some(x) => write_js_number(f, x),
            None => write!(f, "{}", n),
        },
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                // Array.prototype.join bỏ trống null
                if !item.is_null() {
                    write_js_value(f, item)?;
                }
            }
            Ok(())
        }
        Value::Object(_) => f.write_str("[object Object]"),
    }
}

/// Number.prototype.toString: dạng mũ khi |x| >= 1e21 hoặc |x| < 1e-6
fn write_js_number(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    // -0 hiển thị như 0
    if x == 0.0 {
        return f.write_str("0");
    }
    let abs = x.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let repr = format!("{:e}", x);
        return match repr.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{}e+{}", mantissa, exp),
            _ => f.write_str(&repr),
        };
    }
    write!(f, "{}", x)
}

impl From<f64> for SentimentScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Value> for SentimentScore {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Body gửi lên endpoint chấm điểm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub keyword: String,
}

impl ScoreRequest {
    pub fn new(keyword: &Keyword) -> Self {
        Self {
            keyword: keyword.as_str().to_string(),
        }
    }
}

/// Body phản hồi thành công.
///
/// Thiếu `data` là lỗi decode; `data: null` thì hợp lệ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(deserialize_with = "required_score")]
    pub data: SentimentScore,
}

// Dùng deserialize_with để serde báo "missing field" thay vì tự điền Null
fn required_score<'de, D>(deserializer: D) -> Result<SentimentScore, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(SentimentScore)
}

/// Body lỗi của scoring service, ví dụ `{"detail": "Invalid Keyword Provided."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}
