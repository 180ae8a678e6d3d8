// Public modules
pub mod app;
pub mod config;
pub mod error_handling;
pub mod scoring_client;
pub mod view;

// Re-exports
pub use app::{Completions, Outcome, ScoreEvent, SentimentApp};
pub use config::AppConfig;
pub use error_handling::ScoringError;
pub use scoring_client::{HttpScoringClient, ScoreProvider};
pub use view::SentimentView;
