//! Core mood type definitions.
//!
//! Defines [`MoodCategory`] (the six canonical moods that key the recommendation
//! tables), [`AnalysisResult`] (one finished analysis), and [`HistoryEntry`] (a result
//! stamped with an id and creation time).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::{Book, Place, Song};
use crate::signals::{ImageAnalysis, VoiceAnalysis};

/// The six canonical mood categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Happy,
    Sad,
    Angry,
    Anxious,
    Calm,
    Excited,
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 6] = [
        Self::Happy,
        Self::Sad,
        Self::Angry,
        Self::Anxious,
        Self::Calm,
        Self::Excited,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Anxious => "anxious",
            Self::Calm => "calm",
            Self::Excited => "excited",
        }
    }

    /// Short human description, as published by the `mood://categories` resource.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Happy => "Joyful, cheerful, content",
            Self::Sad => "Down, blue, melancholic",
            Self::Angry => "Frustrated, mad, irritated",
            Self::Anxious => "Worried, nervous, stressed",
            Self::Calm => "Relaxed, peaceful, serene",
            Self::Excited => "Energetic, enthusiastic, thrilled",
        }
    }
}

impl std::fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Self::Happy),
            "sad" => Ok(Self::Sad),
            "angry" => Ok(Self::Angry),
            "anxious" => Ok(Self::Anxious),
            "calm" => Ok(Self::Calm),
            "excited" => Ok(Self::Excited),
            _ => Err(format!("unknown mood category: {s}")),
        }
    }
}

/// The text channel's contribution to a multi-modal analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSignal {
    pub mood: String,
    pub confidence: f64,
}

/// Per-source breakdown attached when voice or image signals took part.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextSignal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageAnalysis>,
}

/// One finished analysis. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Free-text mood label, from the LLM or the multi-modal blend.
    pub mood_detected: String,
    pub empathy_response: String,
    pub recommendation: String,
    pub motivational_quote: String,
    pub music_recommendation: Song,
    pub book_recommendation: Book,
    pub place_recommendation: Place,
    /// Combined confidence in `[0.0, 1.0]`; present only for multi-modal results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Contributing sources, e.g. `["text", "voice"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_details: Option<AnalysisDetails>,
}

/// A stored analysis: the result plus its creation time and id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub result: AnalysisResult,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// UUID v7 (time-sortable).
    pub id: String,
}

impl HistoryEntry {
    /// Stamp a result with the current time and a fresh id.
    pub fn new(result: AnalysisResult) -> Self {
        Self {
            result,
            timestamp: chrono::Utc::now().timestamp_millis(),
            id: uuid::Uuid::now_v7().to_string(),
        }
    }
}
