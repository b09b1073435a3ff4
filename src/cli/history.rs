//! CLI `history` and `history-clear` commands.

use anyhow::{bail, Result};
use chrono::{Local, TimeZone};
use std::io::Write;

use mindful::config::MindfulConfig;
use mindful::history::HistoryStore;

fn open(config: &MindfulConfig) -> Result<HistoryStore> {
    Ok(HistoryStore::load(
        config.resolved_history_path(),
        config.history.capacity,
    )?)
}

/// Print stored analyses, newest first.
pub fn history(config: &MindfulConfig, limit: Option<usize>) -> Result<()> {
    let store = open(config)?;
    let entries = store.entries();

    if entries.is_empty() {
        println!("No mood history yet.");
        return Ok(());
    }

    let shown = limit.unwrap_or(entries.len()).min(entries.len());
    println!("Mood History ({shown} of {})", entries.len());
    println!("{}", "=".repeat(40));
    for entry in entries.iter().take(shown) {
        let when = Local
            .timestamp_millis_opt(entry.timestamp)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| entry.timestamp.to_string());
        let confidence = entry
            .result
            .confidence
            .map(|c| format!(" ({:.0}%)", c * 100.0))
            .unwrap_or_default();
        println!("  {when}  {}{confidence}", entry.result.mood_detected);
        println!(
            "      {} by {}",
            entry.result.music_recommendation.title, entry.result.music_recommendation.artist
        );
    }

    Ok(())
}

/// Delete all stored analyses after user confirmation.
pub fn history_clear(config: &MindfulConfig) -> Result<()> {
    let mut store = open(config)?;

    println!("This will permanently delete {} stored analyses.", store.len());
    println!("History file: {}", store.path().display());
    print!("\nType YES to confirm: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if input.trim() != "YES" {
        bail!("clear cancelled");
    }

    store.clear()?;
    println!("Mood history cleared.");
    Ok(())
}
