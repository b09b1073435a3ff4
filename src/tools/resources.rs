//! Read-only MCP resources: mood categories, tool history, and the three tables.

use serde_json::json;

use crate::catalog::Catalog;
use crate::history::{BoundedHistory, ToolHistoryEntry};
use crate::mood::MoodCategory;

pub const CATEGORIES_URI: &str = "mood://categories";
pub const HISTORY_URI: &str = "mood://history";
pub const MUSIC_URI: &str = "music://database";
pub const BOOKS_URI: &str = "books://database";
pub const PLACES_URI: &str = "places://database";

/// Entries shown by `mood://history`.
const HISTORY_PREVIEW: usize = 10;

/// A published resource: uri, display name, description.
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const RESOURCES: [ResourceDescriptor; 5] = [
    ResourceDescriptor {
        uri: CATEGORIES_URI,
        name: "Mood Categories",
        description: "List of all supported mood categories",
    },
    ResourceDescriptor {
        uri: HISTORY_URI,
        name: "Mood History",
        description: "Recent mood analysis history",
    },
    ResourceDescriptor {
        uri: MUSIC_URI,
        name: "Music Database",
        description: "Complete music database organized by mood",
    },
    ResourceDescriptor {
        uri: BOOKS_URI,
        name: "Books Database",
        description: "Complete books database organized by mood",
    },
    ResourceDescriptor {
        uri: PLACES_URI,
        name: "Places Database",
        description: "Complete places database organized by mood",
    },
];

pub fn categories_json() -> serde_json::Value {
    let descriptions: serde_json::Map<String, serde_json::Value> = MoodCategory::ALL
        .iter()
        .map(|c| (c.as_str().to_string(), json!(c.description())))
        .collect();
    json!({
        "categories": MoodCategory::ALL,
        "descriptions": descriptions,
    })
}

pub fn history_json(history: &BoundedHistory<ToolHistoryEntry>) -> serde_json::Value {
    let recent: Vec<&ToolHistoryEntry> = history.recent(HISTORY_PREVIEW).collect();
    json!({
        "total": history.len(),
        "recent": recent,
    })
}

/// Render the resource at `uri`, or `None` when no such resource exists.
pub fn render(
    uri: &str,
    catalog: &Catalog,
    history: &BoundedHistory<ToolHistoryEntry>,
) -> Option<serde_json::Result<String>> {
    let value = match uri {
        CATEGORIES_URI => categories_json(),
        HISTORY_URI => history_json(history),
        MUSIC_URI => json!(catalog.music_by_mood()),
        BOOKS_URI => json!(catalog.books_by_mood()),
        PLACES_URI => json!(catalog.places_by_mood()),
        _ => return None,
    };
    Some(serde_json::to_string_pretty(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_lists_all_six_with_descriptions() {
        let value = categories_json();
        assert_eq!(value["categories"].as_array().unwrap().len(), 6);
        assert_eq!(value["categories"][0], "happy");
        assert_eq!(value["descriptions"]["calm"], "Relaxed, peaceful, serene");
    }

    #[test]
    fn history_preview_is_capped() {
        let mut history = BoundedHistory::with_capacity(50);
        for i in 0..12 {
            history.push(ToolHistoryEntry::new(MoodCategory::Sad, &format!("entry {i}")));
        }
        let value = history_json(&history);
        assert_eq!(value["total"], 12);
        let recent = value["recent"].as_array().unwrap();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0]["input"], "entry 11");
    }

    #[test]
    fn unknown_uri_renders_nothing() {
        let catalog = Catalog::bundled().unwrap();
        let history = BoundedHistory::with_capacity(1);
        assert!(render("mood://nope", &catalog, &history).is_none());
        let books = render(BOOKS_URI, &catalog, &history).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&books).unwrap();
        assert_eq!(value["anxious"].as_array().unwrap().len(), 5);
    }
}
