//! Server initialization for the MCP transports and the HTTP analysis service.
//!
//! Provides [`serve_stdio`] and [`serve_http`] for the MCP tool server, and [`serve_web`]
//! for the mood analysis API. Each wires the shared catalog and the relevant history
//! store into a running server.

use crate::analyze::MoodAnalyzer;
use crate::catalog::Catalog;
use crate::config::MindfulConfig;
use crate::history::HistoryStore;
use crate::llm::OpenAiMoodModel;
use crate::tools::MindfulTools;
use crate::web::{self, AppState};
use anyhow::{Context, Result};
use rmcp::ServiceExt;
use std::sync::Arc;

/// Load the bundled recommendation tables once for the whole process.
fn load_catalog() -> Result<Arc<Catalog>> {
    let catalog = Catalog::bundled()?;
    tracing::info!("recommendation catalog ready");
    Ok(Arc::new(catalog))
}

/// Build the analysis pipeline and open the persisted history.
pub fn build_app_state(config: &MindfulConfig) -> Result<AppState> {
    let catalog = load_catalog()?;

    let model = OpenAiMoodModel::new(&config.llm).context("failed to build LLM client")?;
    if !model.client().has_api_key() {
        tracing::warn!("OPENAI_API_KEY is not set; analysis requests will fail until it is");
    }

    let analyzer = MoodAnalyzer::new(Arc::new(model), catalog, &config.analysis);

    let history_path = config.resolved_history_path();
    let history = HistoryStore::load(&history_path, config.history.capacity)
        .with_context(|| format!("failed to load history from {}", history_path.display()))?;

    Ok(AppState::new(Arc::new(analyzer), history))
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: MindfulConfig) -> Result<()> {
    tracing::info!("starting Mindful MCP server on stdio");

    let catalog = load_catalog()?;
    let history = MindfulTools::new_history(config.history.tool_capacity);

    let tools = MindfulTools::new(catalog, history);
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Start the MCP server over Streamable HTTP transport.
///
/// Every session shares the same catalog and history buffer.
pub async fn serve_http(config: MindfulConfig) -> Result<()> {
    let bind_addr = config.bind_addr();

    tracing::info!(addr = %bind_addr, "starting Mindful MCP server on HTTP");

    let catalog = load_catalog()?;
    let history = MindfulTools::new_history(config.history.tool_capacity);

    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(MindfulTools::new(catalog.clone(), history.clone())),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "MCP server listening at http://{bind_addr}/mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal("MCP HTTP server"))
        .await?;

    Ok(())
}

/// Start the mood analysis HTTP API.
pub async fn serve_web(config: MindfulConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    let state = build_app_state(&config)?;
    let router = web::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "mood analysis API listening at http://{bind_addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal("web server"))
        .await?;

    Ok(())
}

async fn shutdown_signal(name: &'static str) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!(server = name, "shutting down");
}
