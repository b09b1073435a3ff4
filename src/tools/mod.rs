pub mod params;
pub mod resources;

use params::{AddToHistoryParams, DetectMoodParams, RecommendationParams};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    AnnotateAble, ListResourcesResult, PaginatedRequestParam, RawResource,
    ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities,
    ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{tool, tool_handler, tool_router, ErrorData, RoleServer, ServerHandler};
use std::sync::{Arc, Mutex};

use crate::catalog::{Catalog, MAX_SONGS_PER_REQUEST};
use crate::history::{BoundedHistory, ToolHistoryEntry};
use crate::mood::categorize;

/// Shared in-memory history for the tool server, newest first.
pub type ToolHistory = Arc<Mutex<BoundedHistory<ToolHistoryEntry>>>;

/// The Mindful MCP tool handler. Holds the shared catalog and the caller-owned history,
/// and exposes all MCP tools via the `#[tool_router]` macro.
#[derive(Clone)]
pub struct MindfulTools {
    tool_router: ToolRouter<Self>,
    catalog: Arc<Catalog>,
    history: ToolHistory,
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("serialization failed: {e}"))
}

#[tool_router]
impl MindfulTools {
    pub fn new(catalog: Arc<Catalog>, history: ToolHistory) -> Self {
        Self {
            tool_router: Self::tool_router(),
            catalog,
            history,
        }
    }

    /// Build a fresh history buffer for [`MindfulTools::new`].
    pub fn new_history(capacity: usize) -> ToolHistory {
        Arc::new(Mutex::new(BoundedHistory::with_capacity(capacity)))
    }

    #[tool(description = "Get music recommendations based on mood category (happy, sad, angry, anxious, calm, excited)")]
    pub async fn get_music_recommendation(
        &self,
        Parameters(params): Parameters<RecommendationParams>,
    ) -> Result<String, String> {
        let count = params.count.unwrap_or(1);
        tracing::info!(mood = %params.mood, count, "get_music_recommendation called");
        to_json(&self.catalog.top_music(params.mood, count))
    }

    #[tool(description = "Get book recommendations based on mood category")]
    pub async fn get_book_recommendation(
        &self,
        Parameters(params): Parameters<RecommendationParams>,
    ) -> Result<String, String> {
        let count = params.count.unwrap_or(1);
        tracing::info!(mood = %params.mood, count, "get_book_recommendation called");
        to_json(&self.catalog.top_books(params.mood, count))
    }

    #[tool(description = "Get place recommendations based on mood category")]
    pub async fn get_place_recommendation(
        &self,
        Parameters(params): Parameters<RecommendationParams>,
    ) -> Result<String, String> {
        let count = params.count.unwrap_or(1);
        tracing::info!(mood = %params.mood, count, "get_place_recommendation called");
        to_json(&self.catalog.top_places(params.mood, count))
    }

    #[tool(description = "Detect mood category from user input text")]
    pub async fn detect_mood(
        &self,
        Parameters(params): Parameters<DetectMoodParams>,
    ) -> Result<String, String> {
        let mood = categorize(&params.text);
        tracing::info!(mood = %mood, text_len = params.text.len(), "detect_mood called");
        to_json(&serde_json::json!({
            "mood": mood,
            "input": params.text,
            "confidence": "rule-based detection",
        }))
    }

    #[tool(description = "Add a mood analysis to history")]
    pub async fn add_to_history(
        &self,
        Parameters(params): Parameters<AddToHistoryParams>,
    ) -> Result<String, String> {
        let size = {
            let mut history = self
                .history
                .lock()
                .map_err(|e| format!("history lock poisoned: {e}"))?;
            history.push(ToolHistoryEntry::new(params.mood, &params.input));
            history.len()
        };
        tracing::info!(mood = %params.mood, history_size = size, "add_to_history called");
        to_json(&serde_json::json!({
            "success": true,
            "message": "Added to history",
            "historySize": size,
        }))
    }

    /// Render a resource body by URI. `Ok(None)` means no such resource.
    pub fn resource_text(&self, uri: &str) -> Result<Option<String>, String> {
        let history = self
            .history
            .lock()
            .map_err(|e| format!("history lock poisoned: {e}"))?;
        resources::render(uri, &self.catalog, &history)
            .transpose()
            .map_err(|e| format!("serialization failed: {e}"))
    }
}

#[tool_handler]
impl ServerHandler for MindfulTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                format!(
                    "Mindful offers mood-matched recommendations. Use detect_mood to classify \
                     text into a mood category, then get_music_recommendation (up to \
                     {MAX_SONGS_PER_REQUEST}), get_book_recommendation or \
                     get_place_recommendation. Record analyses with add_to_history."
                ),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let items = resources::RESOURCES
            .iter()
            .map(|r| {
                let mut raw = RawResource::new(r.uri, r.name);
                raw.description = Some(r.description.to_string());
                raw.mime_type = Some("application/json".to_string());
                raw.no_annotation()
            })
            .collect();
        Ok(ListResourcesResult::with_all_items(items))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let uri = request.uri;
        tracing::debug!(uri = %uri, "read_resource called");
        match self.resource_text(&uri) {
            Ok(Some(text)) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(text, uri)],
            }),
            Ok(None) => Err(ErrorData::resource_not_found(
                format!("Unknown resource: {uri}"),
                Some(serde_json::json!({ "uri": uri })),
            )),
            Err(e) => Err(ErrorData::internal_error(e, None)),
        }
    }
}
