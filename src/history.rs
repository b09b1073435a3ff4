//! Bounded, newest-first history stores.
//!
//! [`BoundedHistory`] is a plain capped buffer owned by whoever needs one; the web
//! service wraps it in a [`HistoryStore`] that mirrors every change to a JSON file, and
//! the MCP server keeps an in-memory one of [`ToolHistoryEntry`] values.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::HistoryResult;
use crate::mood::{HistoryEntry, MoodCategory};

/// Characters of the user's input kept in a tool history entry.
const TOOL_INPUT_PREVIEW_CHARS: usize = 100;

/// Newest-first buffer holding at most `capacity` items.
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build from items already ordered newest first, dropping anything past the cap.
    pub fn from_newest_first(items: impl IntoIterator<Item = T>, capacity: usize) -> Self {
        Self {
            items: items.into_iter().take(capacity).collect(),
            capacity,
        }
    }

    /// Put `item` at the front, evicting the oldest entry when full.
    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        self.items.push_front(item);
        self.items.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// The `n` newest items.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &T> {
        self.items.iter().take(n)
    }

    pub fn newest(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> BoundedHistory<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

/// Analysis history persisted as one JSON array, newest first.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: BoundedHistory<HistoryEntry>,
}

impl HistoryStore {
    /// Read the store at `path`. A missing file is an empty history.
    pub fn load(path: impl Into<PathBuf>, capacity: usize) -> HistoryResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let stored: Vec<HistoryEntry> = if contents.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&contents)?
            };
            if stored.len() > capacity {
                debug!(
                    stored = stored.len(),
                    capacity, "history file exceeds capacity, truncating"
                );
            }
            BoundedHistory::from_newest_first(stored, capacity)
        } else {
            BoundedHistory::with_capacity(capacity)
        };

        info!(path = %path.display(), entries = entries.len(), "history loaded");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prepend an entry and persist. On a failed write the store is left unchanged.
    pub fn record(&mut self, entry: HistoryEntry) -> HistoryResult<()> {
        debug!(id = %entry.id, mood = %entry.result.mood_detected, "recording history entry");
        let mut next = self.entries.clone();
        next.push(entry);
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }

    pub fn clear(&mut self) -> HistoryResult<()> {
        let empty = BoundedHistory::with_capacity(self.entries.capacity());
        self.persist(&empty)?;
        self.entries = empty;
        Ok(())
    }

    /// Snapshot of all entries, newest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.to_vec()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self, entries: &BoundedHistory<HistoryEntry>) -> HistoryResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let snapshot: Vec<&HistoryEntry> = entries.iter().collect();
        let json = serde_json::to_string_pretty(&snapshot)?;

        // write-then-rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// One `add_to_history` call on the MCP server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolHistoryEntry {
    /// RFC 3339.
    pub timestamp: String,
    pub mood: MoodCategory,
    pub input: String,
}

impl ToolHistoryEntry {
    pub fn new(mood: MoodCategory, input: &str) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            mood,
            input: input.chars().take(TOOL_INPUT_PREVIEW_CHARS).collect(),
        }
    }
}
