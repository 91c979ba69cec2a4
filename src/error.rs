use thiserror::Error;
use std::io;

/// Custom result type alias for the application
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Errors that can occur while analyzing a repository
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// I/O errors
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing/serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Repository clone failures (bad URL, private repo, unreachable host)
    #[error("{0}")]
    CloneFailed(String),

    /// Language model backend errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// General message errors
    #[error("{0}")]
    Message(String),
}

impl AnalyzerError {
    /// Creates a new error with the specified message
    pub fn new(message: &str) -> Self {
        Self::Message(message.to_string())
    }

    /// Whether this error was caused by bad client input rather than a
    /// server-side failure. Maps to a 4xx status at the HTTP surface.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::CloneFailed(_))
    }
}
