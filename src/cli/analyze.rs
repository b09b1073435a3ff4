//! CLI `analyze` command: one-shot analysis printed as JSON and recorded in history.

use anyhow::{Context, Result};

use mindful::analyze::MoodInput;
use mindful::config::MindfulConfig;
use mindful::mood::HistoryEntry;

pub async fn analyze(config: &MindfulConfig, text: &str) -> Result<()> {
    let state = mindful::server::build_app_state(config)?;

    let result = state
        .analyzer
        .analyze(&MoodInput::text(text))
        .await
        .context("analysis failed")?;

    state
        .history
        .lock()
        .await
        .record(HistoryEntry::new(result.clone()))
        .context("failed to record analysis in history")?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
