//! MCP tool parameter definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::mood::MoodCategory;

/// Parameters for the three `get_*_recommendation` tools.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RecommendationParams {
    #[schemars(description = "The mood category (happy, sad, angry, anxious, calm, excited)")]
    pub mood: MoodCategory,

    /// Defaults to 1. Music is capped at 5, books and places at the table size.
    #[schemars(description = "Number of recommendations to return (default 1)")]
    pub count: Option<usize>,
}

/// Parameters for the `detect_mood` tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DetectMoodParams {
    #[schemars(description = "User input text to analyze for mood")]
    pub text: String,
}

/// Parameters for the `add_to_history` tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddToHistoryParams {
    #[schemars(description = "Detected mood")]
    pub mood: MoodCategory,

    #[schemars(description = "The user's original input")]
    pub input: String,
}
