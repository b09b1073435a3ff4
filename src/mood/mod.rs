//! Mood categories, the keyword categorizer, and the analysis result records.

pub mod categorize;
pub mod types;

pub use categorize::categorize;
pub use types::{AnalysisDetails, AnalysisResult, HistoryEntry, MoodCategory, TextSignal};
