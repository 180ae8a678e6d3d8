use std::sync::Arc;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use sentiment_analyzer::scoring_client::{spawn_health_check, HEALTH_CHECK_TIMEOUT};
use sentiment_analyzer::{AppConfig, HttpScoringClient, SentimentApp};
use sentiment_common::{init_tracing, DiagnosticLog};

const QUIT_COMMAND: &str = ":q";

#[tokio::main]
async fn main() -> Result<()> {
    // Tải cấu hình
    let (config, config_error) = match AppConfig::from_env() {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::new(), Some(e)),
    };

    // Thiết lập logging, giữ guard đến hết main
    let _guard = init_tracing(&config.logging())?;
    if let Some(e) = config_error {
        warn!("Không thể tải cấu hình từ biến môi trường, sử dụng cấu hình mặc định: {}", e);
    }

    info!("Khởi động Sentiment Analyzer...");

    let client = Arc::new(HttpScoringClient::new(&config)?);
    info!("Scoring endpoint: {}", client.score_url());

    let diagnostics = DiagnosticLog::new();
    if config.health_check {
        // Chạy nền, không chờ kết quả
        let _ = spawn_health_check(Arc::clone(&client), diagnostics.clone(), HEALTH_CHECK_TIMEOUT);
    }

    let (mut app, mut completions) = SentimentApp::new(client, diagnostics);
    println!("{}", app.view().render());
    println!("(Nhập keyword rồi Enter để lấy điểm, {} để thoát)", QUIT_COMMAND);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    None => break,
                    Some(text) if text.trim() == QUIT_COMMAND => break,
                    Some(text) => {
                        // Một dòng = sửa keyword rồi bấm nút
                        app.edit_keyword(text);
                        app.submit();
                    }
                }
            }
            Some(event) = completions.next() => {
                app.apply(event);
                println!("{}", app.view().render());
            }
        }
    }

    info!("Dừng Sentiment Analyzer");
    Ok(())
}
