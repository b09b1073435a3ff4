//! HTTP service for the mood analysis UI.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | POST | `/api/analyze-mood` | [`MoodInput`] → [`AnalysisResult`](crate::mood::AnalysisResult) |
//! | GET | `/api/history` | entries, newest first (`?limit=N`) |
//! | DELETE | `/api/history` | clears the history |
//! | GET | `/api/pattern` | [`EmotionalPattern`] plus an `insight` sentence |
//! | GET | `/health` | `{status, version}` |

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::analyze::{MoodAnalyzer, MoodInput};
use crate::error::{AnalyzeError, HistoryError};
use crate::history::HistoryStore;
use crate::mood::{AnalysisResult, HistoryEntry};
use crate::pattern::{self, EmotionalPattern};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<MoodAnalyzer>,
    pub history: Arc<Mutex<HistoryStore>>,
}

impl AppState {
    pub fn new(analyzer: Arc<MoodAnalyzer>, history: HistoryStore) -> Self {
        Self {
            analyzer,
            history: Arc::new(Mutex::new(history)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PatternResponse {
    #[serde(flatten)]
    pub pattern: EmotionalPattern,
    pub insight: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze-mood", post(analyze_mood))
        .route("/api/history", get(list_history).delete(clear_history))
        .route("/api/pattern", get(emotional_pattern))
        .route("/health", get(health_check))
        .with_state(state)
}

/// POST /api/analyze-mood
///
/// A body that does not parse is a 400 with the usual `{"error"}` shape. A result that
/// fails to persist is still returned to the caller.
pub async fn analyze_mood(
    State(state): State<AppState>,
    payload: Result<Json<MoodInput>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AnalyzeError> {
    let Json(input) = payload.map_err(|rejection| {
        debug!(status = %rejection.status(), "rejected analyze-mood body");
        AnalyzeError::InvalidBody(rejection.body_text())
    })?;
    let result = state.analyzer.analyze(&input).await?;

    let entry = HistoryEntry::new(result.clone());
    let mut history = state.history.clone().lock_owned().await;
    match tokio::task::spawn_blocking(move || history.record(entry)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "failed to persist analysis to history"),
        Err(e) => warn!(error = %e, "history write task failed"),
    }

    Ok(Json(result))
}

/// GET /api/history
pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<HistoryEntry>> {
    let mut entries = state.history.lock().await.entries();
    if let Some(limit) = query.limit {
        entries.truncate(limit);
    }
    Json(entries)
}

/// DELETE /api/history
pub async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, HistoryError> {
    let mut history = state.history.clone().lock_owned().await;
    tokio::task::spawn_blocking(move || history.clear()).await??;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/pattern
pub async fn emotional_pattern(State(state): State<AppState>) -> Json<PatternResponse> {
    let entries = state.history.lock().await.entries();
    let pattern = pattern::analyze(&entries);
    let insight = pattern.insight();
    Json(PatternResponse { pattern, insight })
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
