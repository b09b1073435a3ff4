//! Error types for the LLM client, the analysis pipeline, and the history store.
//!
//! [`AnalyzeError`] is the only error that crosses the HTTP boundary; it renders as a
//! `{"error": "..."}` body with a 400, 429 or 500 status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::mood::MoodCategory;

/// Chat-completion API errors.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OpenAI API key is not configured")]
    MissingApiKey,

    #[error("rate limited by LLM provider")]
    RateLimited,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM unavailable: {message} (retries: {retries})")]
    Unavailable { message: String, retries: u32 },
}

impl LlmError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited | Self::Timeout { .. } | Self::Http(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::MissingApiKey
            | Self::InvalidResponse { .. }
            | Self::Unavailable { .. } => false,
        }
    }
}

/// Failures of a single mood analysis request.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("text_input is required")]
    MissingInput,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("OpenAI API key not configured")]
    Config,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Failed to analyze mood")]
    Failed(#[source] LlmError),

    #[error("no recommendations available for {category}")]
    NoRecommendation { category: MoodCategory },
}

impl From<LlmError> for AnalyzeError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => Self::Config,
            LlmError::RateLimited => Self::RateLimited,
            other => Self::Failed(other),
        }
    }
}

impl AnalyzeError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingInput | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Config | Self::Failed(_) | Self::NoRecommendation { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

/// Persisted history store errors.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("history file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("history write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for HistoryError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "history store failure");
        let body = Json(serde_json::json!({
            "error": "History store unavailable",
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type LlmResult<T> = Result<T, LlmError>;

pub type HistoryResult<T> = Result<T, HistoryError>;
