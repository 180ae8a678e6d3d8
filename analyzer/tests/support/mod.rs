//! Scoring service giả lập bằng axum, chạy trên cổng ngẫu nhiên.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use sentiment_analyzer::AppConfig;

/// Request mà stub đã nhận
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
    /// `GET /` nhận kết nối nhưng không bao giờ trả lời
    hang_root: bool,
}

impl StubState {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Body của request thứ `index`, decode thành JSON
    pub fn body_json(&self, index: usize) -> serde_json::Value {
        serde_json::from_str(&self.requests()[index].body).unwrap()
    }
}

pub struct ScoringStub {
    pub addr: SocketAddr,
    pub state: StubState,
}

impl ScoringStub {
    /// Khởi động stub, trả lần lượt các response đã cho; hết thì trả `{"data": 0}`
    pub async fn start(responses: Vec<(StatusCode, &str)>) -> Self {
        Self::start_with(responses, false).await
    }

    /// Như `start`, nhưng `GET /` treo vĩnh viễn
    pub async fn start_with_hanging_root(responses: Vec<(StatusCode, &str)>) -> Self {
        Self::start_with(responses, true).await
    }

    async fn start_with(responses: Vec<(StatusCode, &str)>, hang_root: bool) -> Self {
        let state = StubState {
            hang_root,
            requests: Arc::default(),
            responses: Arc::new(Mutex::new(
                responses
                    .into_iter()
                    .map(|(status, body)| (status, body.to_string()))
                    .collect(),
            )),
        };

        let router = Router::new()
            .route("/", get(root))
            .route("/get_score", post(get_score))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::Server::from_tcp(listener)
                .unwrap()
                .serve(router.into_make_service())
                .await
                .unwrap();
        });

        Self { addr, state }
    }

    pub fn config(&self) -> AppConfig {
        AppConfig::with_api_url(format!("http://{}", self.addr))
    }
}

/// Config trỏ tới một cổng không có ai lắng nghe
pub fn unreachable_config() -> AppConfig {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    AppConfig::with_api_url(format!("http://{}", addr))
}

async fn root(State(state): State<StubState>) -> (StatusCode, &'static str) {
    if state.hang_root {
        std::future::pending::<()>().await;
    }
    (StatusCode::OK, r#"["Server is running successfully!"]"#)
}

async fn get_score(
    State(state): State<StubState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(RecordedRequest {
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::OK, r#"{"data": 0}"#.to_string()))
}
